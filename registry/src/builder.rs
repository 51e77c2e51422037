//! BranchDefBuilder for adding and editing registered branches.

use crate::{BranchDef, BranchRegistry};
use kin_core::{BranchId, PersonId, TreeId};
use kin_traversal::{generation_bound, TraversalError};
use thiserror::Error;

/// Errors that can occur while maintaining the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate branch: {id} already exists in tree {tree}")]
    DuplicateBranch { tree: TreeId, id: BranchId },

    #[error("Unknown branch: {id} in tree {tree}")]
    UnknownBranch { tree: TreeId, id: BranchId },

    #[error("Branch {0} has no root person")]
    MissingRoot(BranchId),

    #[error("Invalid branch {id}: {source}")]
    InvalidBranch {
        id: BranchId,
        #[source]
        source: TraversalError,
    },
}

impl RegistryError {
    pub fn duplicate_branch(tree: &TreeId, id: &BranchId) -> Self {
        Self::DuplicateBranch {
            tree: tree.clone(),
            id: id.clone(),
        }
    }

    pub fn unknown_branch(tree: &TreeId, id: &BranchId) -> Self {
        Self::UnknownBranch {
            tree: tree.clone(),
            id: id.clone(),
        }
    }

    pub fn invalid_branch(id: &BranchId, source: TraversalError) -> Self {
        Self::InvalidBranch {
            id: id.clone(),
            source,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Builder for a branch definition.
///
/// Generation counts are taken as signed integers, the way they arrive from
/// forms and config files, and checked when the definition is finished.
pub struct BranchDefBuilder<'a> {
    registry: &'a mut BranchRegistry,
    tree: TreeId,
    id: BranchId,
    description: String,
    root: Option<PersonId>,
    ancestors: i64,
    descendants_of_ancestors: i64,
    descendants: i64,
    include_spouses: bool,
    replacing: bool,
}

impl<'a> BranchDefBuilder<'a> {
    pub(crate) fn new(registry: &'a mut BranchRegistry, tree: TreeId, id: BranchId) -> Self {
        Self {
            registry,
            tree,
            id,
            description: String::new(),
            root: None,
            ancestors: 0,
            descendants_of_ancestors: 0,
            descendants: 0,
            include_spouses: false,
            replacing: false,
        }
    }

    pub(crate) fn editing(registry: &'a mut BranchRegistry, def: BranchDef) -> Self {
        Self {
            registry,
            tree: def.tree,
            id: def.id,
            description: def.description,
            root: Some(def.root),
            ancestors: i64::from(def.ancestor_generations),
            descendants_of_ancestors: i64::from(def.descendant_of_ancestor_generations),
            descendants: i64::from(def.descendant_generations),
            include_spouses: def.include_spouses,
            replacing: true,
        }
    }

    /// Set the description.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Set the root person.
    pub fn root(mut self, person: impl Into<PersonId>) -> Self {
        self.root = Some(person.into());
        self
    }

    /// Generations above the root.
    pub fn ancestors(mut self, generations: i64) -> Self {
        self.ancestors = generations;
        self
    }

    /// Generations below each ancestor.
    pub fn descendants_of_ancestors(mut self, generations: i64) -> Self {
        self.descendants_of_ancestors = generations;
        self
    }

    /// Generations below the root.
    pub fn descendants(mut self, generations: i64) -> Self {
        self.descendants = generations;
        self
    }

    /// Include spouses of collected persons.
    pub fn spouses(mut self, include: bool) -> Self {
        self.include_spouses = include;
        self
    }

    /// Finish building this branch and store it in the registry.
    pub fn done(self) -> RegistryResult<BranchId> {
        let exists = self.registry.get(&self.tree, &self.id).is_some();
        if exists && !self.replacing {
            return Err(RegistryError::duplicate_branch(&self.tree, &self.id));
        }

        let root = self
            .root
            .ok_or_else(|| RegistryError::MissingRoot(self.id.clone()))?;

        let invalid = |e| RegistryError::invalid_branch(&self.id, e);
        let def = BranchDef {
            ancestor_generations: generation_bound("ancestor generations", self.ancestors)
                .map_err(invalid)?,
            descendant_of_ancestor_generations: generation_bound(
                "descendant-of-ancestor generations",
                self.descendants_of_ancestors,
            )
            .map_err(invalid)?,
            descendant_generations: generation_bound("descendant generations", self.descendants)
                .map_err(invalid)?,
            include_spouses: self.include_spouses,
            description: self.description,
            root,
            tree: self.tree,
            id: self.id.clone(),
        };

        self.registry.store(def)?;
        Ok(self.id)
    }
}
