//! Read-only access to a genealogy graph.

use crate::{Family, FamilyId, GraphResult, PersonId, TreeId};

/// Read-only queries over one genealogy tree.
///
/// Implementations must be read-consistent for the duration of one
/// traversal. Traversal borrows the accessor immutably, so an in-memory
/// implementation gets that for free; a database-backed one should read from
/// a snapshot or transaction.
pub trait GraphAccessor {
    /// The family in which `person` is a child, if any.
    ///
    /// Returns [`GraphError::PersonNotFound`](crate::GraphError::PersonNotFound)
    /// when the person does not exist in `tree`.
    fn parent_family(&self, tree: &TreeId, person: &PersonId) -> GraphResult<Option<FamilyId>>;

    /// Families in which `person` occupies a spouse slot, i.e. the families
    /// holding that person's children.
    fn spouse_families(&self, tree: &TreeId, person: &PersonId) -> GraphResult<Vec<FamilyId>>;

    /// Get a family record.
    fn family(&self, tree: &TreeId, family: &FamilyId) -> GraphResult<Family>;
}

impl<G: GraphAccessor + ?Sized> GraphAccessor for &G {
    fn parent_family(&self, tree: &TreeId, person: &PersonId) -> GraphResult<Option<FamilyId>> {
        (**self).parent_family(tree, person)
    }

    fn spouse_families(&self, tree: &TreeId, person: &PersonId) -> GraphResult<Vec<FamilyId>> {
        (**self).spouse_families(tree, person)
    }

    fn family(&self, tree: &TreeId, family: &FamilyId) -> GraphResult<Family> {
        (**self).family(tree, family)
    }
}
