//! Mutation error types.

use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during plan execution.
///
/// Failures of individual records are not errors: they are collected in
/// [`OperationResult`](crate::OperationResult) and processing continues.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Refusing to run irreversible {action} on {records} records without confirmation")]
    IrreversibleNotConfirmed { action: String, records: usize },

    #[error("{failed} of {total} records failed; first failure: {first}")]
    PartialFailure {
        failed: usize,
        total: usize,
        first: String,
    },
}

impl MutationError {
    pub fn irreversible_not_confirmed(action: impl Into<String>, records: usize) -> Self {
        Self::IrreversibleNotConfirmed {
            action: action.into(),
            records,
        }
    }

    pub fn partial_failure(failed: usize, total: usize, first: impl Into<String>) -> Self {
        Self::PartialFailure {
            failed,
            total,
            first: first.into(),
        }
    }
}
