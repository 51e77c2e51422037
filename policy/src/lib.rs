//! Kin Policy
//!
//! Decide what happens to each record of a branch.
//!
//! Responsibilities:
//! - Validate branch labels
//! - Apply the overwrite mode (overwrite, append, leave) for `add`
//! - Remove one label from composite values for `clear`
//! - Enumerate records for `delete` and flag the plan irreversible
//!
//! # Module Structure
//!
//! - `action` - Action and OverwriteMode
//! - `builder` - LabelPolicy and the pure plan builder
//! - `plan` - LabelMutationPlan and per-record changes
//! - `rule` - Label validation
//! - `error` - Error types for plan construction

mod action;
mod builder;
mod error;
mod plan;
mod rule;

pub use action::{Action, OverwriteMode};
pub use builder::{build_plan, CurrentLabels, LabelPolicy};
pub use error::{PolicyError, PolicyResult};
pub use plan::{LabelMutationPlan, PlannedChange, PlannedMutation, SkipReason};
pub use rule::{LabelRule, IDENTIFIER_LABEL_PATTERN};
