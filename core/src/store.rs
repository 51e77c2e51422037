//! Write access to branch labels and records.

use crate::{Family, FamilyId, PersonId, RecordId, StoreResult};

/// Persistence operations the mutation executor depends on.
///
/// A store is scoped to one tree. Each call is one independent write; the
/// executor never assumes a transaction spans several calls.
pub trait MutationStore {
    /// Read the raw branch field of a record (empty when unlabeled).
    fn read_label(&self, record: &RecordId) -> StoreResult<String>;

    /// Replace the raw branch field of a record.
    fn write_label(&mut self, record: &RecordId, label: &str) -> StoreResult<()>;

    /// Delete a record.
    ///
    /// Deleting a person must also detach it from every family slot that
    /// references it; deleting a family must clear the parent link of its
    /// children.
    fn delete_record(&mut self, record: &RecordId) -> StoreResult<()>;

    /// Families that reference `person` as spouse or child.
    fn families_of(&self, person: &PersonId) -> StoreResult<Vec<FamilyId>>;

    /// Get a family record.
    fn family_record(&self, family: &FamilyId) -> StoreResult<Family>;

    /// Flag a family whose children have all been deleted.
    fn mark_childless(&mut self, family: &FamilyId) -> StoreResult<()>;
}
