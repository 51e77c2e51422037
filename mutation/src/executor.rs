//! Mutation executor - applies a label plan to a store.
//!
//! The executor delegates to the operation modules in `ops/`:
//! - `ops/write.rs` - label writes (`add`, `clear`)
//! - `ops/delete.rs` - record deletion with orphan handling (`delete`)

use kin_core::{FamilyId, MutationStore, PersonId};
use kin_policy::{LabelMutationPlan, PlannedChange};
use tracing::{info, warn};

use crate::error::{MutationError, MutationResult};
use crate::ops::{self, OrphanPolicy};
use crate::result::OperationResult;

/// Mutation executor.
pub struct MutationExecutor<'s, S: MutationStore + ?Sized> {
    store: &'s mut S,
    orphan_policy: OrphanPolicy,
    verify: bool,
}

impl<'s, S: MutationStore + ?Sized> MutationExecutor<'s, S> {
    /// Create a new executor that verifies labels before writing.
    pub fn new(store: &'s mut S) -> Self {
        Self {
            store,
            orphan_policy: OrphanPolicy::default(),
            verify: true,
        }
    }

    /// Set how families orphaned by `delete` are handled.
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Enable or disable the read-before-write stale label check.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Execute a plan.
    ///
    /// Record failures do not stop the run; they are collected in the
    /// returned result. The only hard error is an irreversible plan that was
    /// not confirmed, in which case nothing is touched.
    pub fn execute(&mut self, plan: &LabelMutationPlan) -> MutationResult<OperationResult> {
        if !plan.is_confirmed() {
            return Err(MutationError::irreversible_not_confirmed(
                plan.action().to_string(),
                plan.targets().count(),
            ));
        }

        let mut result = OperationResult::new(plan.action());
        let mut delete_persons: Vec<PersonId> = Vec::new();
        let mut delete_families: Vec<FamilyId> = Vec::new();

        for mutation in plan.mutations() {
            match &mutation.change {
                PlannedChange::Skip(reason) => {
                    result.record_skipped(mutation.record.clone(), reason.clone());
                }
                PlannedChange::Write { from, to } => {
                    ops::execute_write(
                        &mut *self.store,
                        &mutation.record,
                        from,
                        to,
                        self.verify,
                        &mut result,
                    );
                }
                PlannedChange::Delete => {
                    if let Some(person) = mutation.record.as_person() {
                        delete_persons.push(person.clone());
                    } else if let Some(family) = mutation.record.as_family() {
                        delete_families.push(family.clone());
                    }
                }
            }
        }

        if !delete_persons.is_empty() || !delete_families.is_empty() {
            ops::execute_deletes(
                &mut *self.store,
                &delete_persons,
                &delete_families,
                self.orphan_policy,
                &mut result,
            );
        }

        if result.records_failed() > 0 {
            warn!(
                action = %plan.action(),
                failed = result.records_failed(),
                total = result.total(),
                "plan executed with failures"
            );
        }
        info!(
            action = %plan.action(),
            label = plan.label(),
            updated = result.records_updated(),
            skipped = result.records_skipped(),
            failed = result.records_failed(),
            cascaded = result.cascaded.len(),
            "plan executed"
        );
        Ok(result)
    }
}
