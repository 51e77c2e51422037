//! Branch definition types.

use kin_core::{BranchId, PersonId, TreeId};
use kin_traversal::BranchSpec;
use serde::{Deserialize, Serialize};

/// A saved branch: a named root person plus traversal bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDef {
    /// Tree the branch belongs to.
    pub tree: TreeId,
    /// Branch identifier, unique within the tree.
    pub id: BranchId,
    /// Free-text description shown to users.
    #[serde(default)]
    pub description: String,
    /// Root person of the branch.
    pub root: PersonId,
    /// Generations above the root.
    #[serde(default)]
    pub ancestor_generations: u32,
    /// Generations below each ancestor.
    #[serde(default)]
    pub descendant_of_ancestor_generations: u32,
    /// Generations below the root.
    #[serde(default)]
    pub descendant_generations: u32,
    /// Include spouses of collected persons.
    #[serde(default)]
    pub include_spouses: bool,
}

impl BranchDef {
    /// The traversal request described by this definition.
    pub fn to_spec(&self) -> BranchSpec {
        BranchSpec::new(self.tree.clone(), self.root.clone())
            .with_ancestors(self.ancestor_generations)
            .with_descendants_of_ancestors(self.descendant_of_ancestor_generations)
            .with_descendants(self.descendant_generations)
            .with_spouses(self.include_spouses)
    }

    /// Returns true if `needle` (already lowercased) occurs in the id or description.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
