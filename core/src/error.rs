//! Collaborator error types.

use crate::{FamilyId, PersonId, RecordId, TreeId};
use thiserror::Error;

/// Errors raised by a [`GraphAccessor`](crate::GraphAccessor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Person not found.
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    /// Family not found.
    #[error("Family not found: {0}")]
    FamilyNotFound(FamilyId),

    /// The accessor does not serve the requested tree.
    #[error("Tree mismatch: requested {requested}, accessor serves {served}")]
    TreeMismatch { requested: TreeId, served: TreeId },

    /// The backing data source failed.
    #[error("Graph backend error: {0}")]
    Backend(String),
}

impl GraphError {
    pub fn tree_mismatch(requested: &TreeId, served: &TreeId) -> Self {
        Self::TreeMismatch {
            requested: requested.clone(),
            served: served.clone(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Result type for graph reads.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by a [`MutationStore`](crate::MutationStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// The write was rejected (constraint violation, lock, concurrent edit).
    #[error("Write rejected for {record}: {reason}")]
    Conflict { record: RecordId, reason: String },

    /// The backing data source failed.
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn conflict(record: RecordId, reason: impl Into<String>) -> Self {
        Self::Conflict {
            record,
            reason: reason.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
