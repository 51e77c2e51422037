//! Operation result types.

use kin_core::{FamilyId, RecordId, StoreError};
use kin_policy::{Action, SkipReason};
use std::fmt;

use crate::error::{MutationError, MutationResult};

/// Why a planned record could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The store rejected the read, write or delete.
    Store(StoreError),
    /// The label changed between planning and execution.
    StaleLabel { expected: String, found: String },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Store(e) => write!(f, "{e}"),
            FailureReason::StaleLabel { expected, found } => write!(
                f,
                "label changed since planning: expected '{expected}', found '{found}'"
            ),
        }
    }
}

impl From<StoreError> for FailureReason {
    fn from(e: StoreError) -> Self {
        FailureReason::Store(e)
    }
}

/// A planned record that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub record: RecordId,
    pub reason: FailureReason,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.reason)
    }
}

/// A change to a family that was not in the plan, caused by deleting its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeEffect {
    /// The family was left with no spouses and no children and was removed.
    FamilyRemoved(FamilyId),
    /// Every child of the family was deleted; the family was kept and marked.
    FamilyMarkedChildless(FamilyId),
    /// The orphan policy could not be applied to the family.
    Failed { family: FamilyId, error: StoreError },
}

/// Overall classification of an operation, for presenting to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    /// The branch had no records; not an error.
    NothingMatched,
    /// Every record was updated or skipped.
    Complete,
    /// At least one record failed; the others were still applied.
    PartialFailure,
}

/// Outcome of executing one plan.
///
/// Every planned record ends in exactly one of `updated`, `skipped` or
/// `errors`. Cascaded family changes are listed separately.
#[derive(Debug, Clone)]
pub struct OperationResult {
    /// Action that was executed.
    pub action: Action,
    /// Records written (or deleted, for `delete`), in plan order.
    pub updated: Vec<RecordId>,
    /// Records left untouched, with the reason.
    pub skipped: Vec<(RecordId, SkipReason)>,
    /// Records that failed, in plan order.
    pub errors: Vec<RecordFailure>,
    /// Families changed by the orphan policy.
    pub cascaded: Vec<CascadeEffect>,
}

impl OperationResult {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            updated: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
            cascaded: Vec::new(),
        }
    }

    pub fn records_updated(&self) -> usize {
        self.updated.len()
    }

    pub fn records_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn records_failed(&self) -> usize {
        self.errors.len()
    }

    /// Number of planned records accounted for.
    pub fn total(&self) -> usize {
        self.records_updated() + self.records_skipped() + self.records_failed()
    }

    pub fn status(&self) -> OperationStatus {
        if !self.errors.is_empty() {
            OperationStatus::PartialFailure
        } else if self.total() == 0 {
            OperationStatus::NothingMatched
        } else {
            OperationStatus::Complete
        }
    }

    /// Convert a partial failure into an error for callers using `?`.
    pub fn into_result(self) -> MutationResult<Self> {
        match self.errors.first() {
            Some(first) => Err(MutationError::partial_failure(
                self.records_failed(),
                self.total(),
                first.to_string(),
            )),
            None => Ok(self),
        }
    }

    pub(crate) fn record_updated(&mut self, record: RecordId) {
        self.updated.push(record);
    }

    pub(crate) fn record_skipped(&mut self, record: RecordId, reason: SkipReason) {
        self.skipped.push((record, reason));
    }

    pub(crate) fn record_failed(&mut self, record: RecordId, reason: impl Into<FailureReason>) {
        self.errors.push(RecordFailure {
            record,
            reason: reason.into(),
        });
    }

    pub(crate) fn record_cascade(&mut self, effect: CascadeEffect) {
        self.cascaded.push(effect);
    }
}
