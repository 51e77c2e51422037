//! Session error types.

use kin_core::{BranchId, StoreError, TreeId};
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Traversal error (invalid spec, graph read, cancellation).
    #[error("traversal error: {0}")]
    Traversal(#[from] kin_traversal::TraversalError),

    /// Policy error (label or action rejected).
    #[error("policy error: {0}")]
    Policy(#[from] kin_policy::PolicyError),

    /// Mutation error.
    #[error("mutation error: {0}")]
    Mutation(#[from] kin_mutation::MutationError),

    /// Registry error.
    #[error("registry error: {0}")]
    Registry(#[from] kin_registry::RegistryError),

    /// Reading current labels failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No branch is registered under the id.
    #[error("unknown branch: {id} in tree {tree}")]
    UnknownBranch { tree: TreeId, id: BranchId },

    /// Configuration could not be loaded or applied.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl SessionError {
    pub fn unknown_branch(tree: &TreeId, id: &BranchId) -> Self {
        Self::UnknownBranch {
            tree: tree.clone(),
            id: id.clone(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
