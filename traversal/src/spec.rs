//! Branch traversal parameters.

use kin_core::{PersonId, TreeId};
use serde::{Deserialize, Serialize};

use crate::error::{TraversalError, TraversalResult};

/// Default upper bound accepted for any generation count.
pub const DEFAULT_MAX_GENERATIONS: u32 = 99;

/// Parameters of one branch traversal.
///
/// A generation count of 0 means no traversal in that direction; there is
/// no "unlimited" value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSpec {
    /// Tree the root belongs to.
    pub tree: TreeId,
    /// Starting individual.
    pub root: PersonId,
    /// Generations walked upward from the root.
    pub ancestor_generations: u32,
    /// Generations walked downward from every ancestor found.
    pub descendant_of_ancestor_generations: u32,
    /// Generations walked downward from the root.
    pub descendant_generations: u32,
    /// Add direct spouses of every visited person as leaves.
    pub include_spouses: bool,
}

impl BranchSpec {
    /// A spec that selects the root only.
    pub fn new(tree: impl Into<TreeId>, root: impl Into<PersonId>) -> Self {
        Self {
            tree: tree.into(),
            root: root.into(),
            ancestor_generations: 0,
            descendant_of_ancestor_generations: 0,
            descendant_generations: 0,
            include_spouses: false,
        }
    }

    pub fn with_ancestors(mut self, generations: u32) -> Self {
        self.ancestor_generations = generations;
        self
    }

    pub fn with_descendants_of_ancestors(mut self, generations: u32) -> Self {
        self.descendant_of_ancestor_generations = generations;
        self
    }

    pub fn with_descendants(mut self, generations: u32) -> Self {
        self.descendant_generations = generations;
        self
    }

    pub fn with_spouses(mut self, include: bool) -> Self {
        self.include_spouses = include;
        self
    }

    /// Check identifiers and generation bounds.
    pub fn validate(&self, max_generations: u32) -> TraversalResult<()> {
        if self.tree.is_blank() {
            return Err(TraversalError::invalid_spec("tree id is empty"));
        }
        if self.root.is_blank() {
            return Err(TraversalError::invalid_spec("root person id is empty"));
        }

        for (field, value) in [
            ("ancestor_generations", self.ancestor_generations),
            (
                "descendant_of_ancestor_generations",
                self.descendant_of_ancestor_generations,
            ),
            ("descendant_generations", self.descendant_generations),
        ] {
            if value > max_generations {
                return Err(TraversalError::invalid_spec(format!(
                    "{field} is {value}, maximum is {max_generations}"
                )));
            }
        }
        Ok(())
    }
}

/// Convert a raw (possibly negative) generation count from caller input.
pub fn generation_bound(field: &str, value: i64) -> TraversalResult<u32> {
    u32::try_from(value).map_err(|_| {
        TraversalError::invalid_spec(format!(
            "{field} must be a non-negative integer, got {value}"
        ))
    })
}
