//! Per-change operation implementations.
//!
//! Label writes and record deletions each live in their own module; both
//! record per-record outcomes into an [`OperationResult`](crate::OperationResult)
//! and never abort on a single failure.

mod delete;
mod write;

use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) use delete::execute_deletes;
pub(crate) use write::execute_write;

/// What happens to a family outside the plan once deletion leaves it orphaned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Delete families left with no spouses and no children.
    #[default]
    RemoveEmpty,
    /// Keep families whose children were all deleted and flag them childless.
    /// Families left with no spouses and no children are still removed.
    MarkChildless,
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanPolicy::RemoveEmpty => f.write_str("remove_empty"),
            OrphanPolicy::MarkChildless => f.write_str("mark_childless"),
        }
    }
}
