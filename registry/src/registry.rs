//! The BranchRegistry - saved branch definitions per tree.

use crate::builder::{BranchDefBuilder, RegistryError, RegistryResult};
use crate::BranchDef;
use kin_core::{BranchId, TreeId};
use kin_traversal::DEFAULT_MAX_GENERATIONS;
use std::collections::BTreeMap;

/// Saved branch definitions, scoped by tree.
///
/// Definitions are kept sorted by id within each tree so listings and
/// searches are stable.
#[derive(Debug, Clone)]
pub struct BranchRegistry {
    /// Definitions by tree, then by branch id.
    branches: BTreeMap<TreeId, BTreeMap<BranchId, BranchDef>>,
    /// Largest generation count a definition may carry.
    max_generations: u32,
}

impl Default for BranchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            branches: BTreeMap::new(),
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }

    /// Set the generation cap checked when definitions are stored.
    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.max_generations = max_generations;
        self
    }

    // ==================== Maintenance ====================

    /// Start a new branch definition. Fails on `done()` if the id is taken.
    pub fn add_branch(
        &mut self,
        tree: impl Into<TreeId>,
        id: impl Into<BranchId>,
    ) -> BranchDefBuilder<'_> {
        BranchDefBuilder::new(self, tree.into(), id.into())
    }

    /// Edit an existing branch definition, starting from its current values.
    pub fn edit_branch(
        &mut self,
        tree: &TreeId,
        id: &BranchId,
    ) -> RegistryResult<BranchDefBuilder<'_>> {
        let def = self
            .get(tree, id)
            .cloned()
            .ok_or_else(|| RegistryError::unknown_branch(tree, id))?;
        Ok(BranchDefBuilder::editing(self, def))
    }

    /// Add a complete definition. Fails if the id is taken.
    pub fn insert(&mut self, def: BranchDef) -> RegistryResult<()> {
        if self.get(&def.tree, &def.id).is_some() {
            return Err(RegistryError::duplicate_branch(&def.tree, &def.id));
        }
        self.store(def)
    }

    /// Remove a definition and return it.
    pub fn remove(&mut self, tree: &TreeId, id: &BranchId) -> RegistryResult<BranchDef> {
        let branches = self
            .branches
            .get_mut(tree)
            .ok_or_else(|| RegistryError::unknown_branch(tree, id))?;
        let def = branches
            .remove(id)
            .ok_or_else(|| RegistryError::unknown_branch(tree, id))?;
        if branches.is_empty() {
            self.branches.remove(tree);
        }
        Ok(def)
    }

    /// Validate and store a definition, replacing any with the same id.
    pub(crate) fn store(&mut self, def: BranchDef) -> RegistryResult<()> {
        def.to_spec()
            .validate(self.max_generations)
            .map_err(|e| RegistryError::invalid_branch(&def.id, e))?;
        self.branches
            .entry(def.tree.clone())
            .or_default()
            .insert(def.id.clone(), def);
        Ok(())
    }

    // ==================== Lookups ====================

    /// Get a definition by tree and id.
    pub fn get(&self, tree: &TreeId, id: &BranchId) -> Option<&BranchDef> {
        self.branches.get(tree).and_then(|b| b.get(id))
    }

    /// All definitions of a tree, ordered by id.
    pub fn branches(&self, tree: &TreeId) -> impl Iterator<Item = &BranchDef> + '_ {
        self.branches.get(tree).into_iter().flat_map(|b| b.values())
    }

    /// Definitions of a tree whose id or description contains `query`,
    /// ignoring case. A blank query matches everything.
    pub fn search<'r>(&'r self, tree: &TreeId, query: &str) -> Vec<&'r BranchDef> {
        let needle = query.trim().to_lowercase();
        self.branches(tree).filter(|def| def.matches(&needle)).collect()
    }

    /// Number of definitions across all trees.
    pub fn len(&self) -> usize {
        self.branches.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
