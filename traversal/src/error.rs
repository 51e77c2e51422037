//! Traversal error types.

use kin_core::GraphError;
use thiserror::Error;

use crate::membership::{MembershipSet, Pass};

/// Result type for traversal operations.
pub type TraversalResult<T> = Result<T, TraversalError>;

/// Errors that can occur while computing branch membership.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// Caller input is unusable; never retried.
    #[error("Invalid branch spec: {reason}")]
    InvalidSpec { reason: String },

    /// The graph accessor failed; the caller may retry.
    #[error("Graph read failed: {0}")]
    GraphRead(#[from] GraphError),

    /// Cancellation was requested between generations.
    #[error("Traversal cancelled during {pass} pass after {} records", .partial.len())]
    Cancelled {
        pass: Pass,
        partial: Box<MembershipSet>,
    },
}

impl TraversalError {
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    pub fn cancelled(pass: Pass, partial: MembershipSet) -> Self {
        Self::Cancelled {
            pass,
            partial: Box::new(partial),
        }
    }

    /// Members collected before cancellation, if this is a cancellation.
    pub fn partial(&self) -> Option<&MembershipSet> {
        match self {
            Self::Cancelled { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
