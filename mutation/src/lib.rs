//! Kin Mutation
//!
//! Apply label mutation plans to a store.
//!
//! Responsibilities:
//! - Refuse irreversible plans that were not confirmed
//! - Write labels, optionally checking they did not change since planning
//! - Delete records and handle the families they leave behind
//! - Account for every planned record as updated, skipped or failed
//!
//! # Module Structure
//!
//! - `executor` - Main MutationExecutor that walks a plan
//! - `ops/` - Label writes and record deletion
//! - `error` - Error types for execution failures
//! - `result` - Per-record outcomes

mod error;
mod executor;
mod ops;
mod result;

pub use error::{MutationError, MutationResult};
pub use executor::MutationExecutor;
pub use ops::OrphanPolicy;
pub use result::{CascadeEffect, FailureReason, OperationResult, OperationStatus, RecordFailure};
