//! Session result types.

use kin_mutation::{OperationResult, OperationStatus};
use kin_policy::LabelMutationPlan;
use kin_traversal::Membership;

/// What an operation would do, without doing it.
#[derive(Debug, Clone)]
pub struct BranchPreview {
    /// Branch members with pass summaries and cycle reports.
    pub membership: Membership,
    /// The plan that would be executed.
    pub plan: LabelMutationPlan,
}

impl BranchPreview {
    /// Number of records that would be written or deleted.
    pub fn target_count(&self) -> usize {
        self.plan.targets().count()
    }
}

/// Result of running the full pipeline on one branch.
#[derive(Debug, Clone)]
pub struct BranchReport {
    /// Branch members with pass summaries and cycle reports.
    pub membership: Membership,
    /// The plan that was executed.
    pub plan: LabelMutationPlan,
    /// Per-record outcomes.
    pub result: OperationResult,
}

impl BranchReport {
    pub fn status(&self) -> OperationStatus {
        self.result.status()
    }
}
