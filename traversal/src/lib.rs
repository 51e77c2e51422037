//! Kin Traversal
//!
//! Compute which persons and families belong to a branch.
//!
//! Responsibilities:
//! - Validate branch parameters
//! - Walk ancestors, descendants of ancestors and descendants, level by level
//! - Add spouses as leaves
//! - Detect data cycles without looping
//! - Stop between generations when cancelled
//!
//! # Module Structure
//!
//! - `spec` - BranchSpec and generation-bound validation
//! - `engine` - TraversalEngine and the breadth-first passes
//! - `membership` - MembershipSet and traversal diagnostics
//! - `cancel` - Cooperative cancellation token
//! - `error` - Error types for traversal failures

mod cancel;
mod engine;
mod error;
mod membership;
mod spec;

pub use cancel::CancelToken;
pub use engine::{compute_membership, TraversalEngine};
pub use error::{TraversalError, TraversalResult};
pub use membership::{CycleReport, Membership, MembershipSet, Pass, PassSummary};
pub use spec::{generation_bound, BranchSpec, DEFAULT_MAX_GENERATIONS};
