//! Branch label actions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PolicyError, PolicyResult};

/// How `add` treats a record that already carries a branch label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwriteMode {
    /// Replace the existing value.
    Overwrite,
    /// Add the label to the existing list.
    Append,
    /// Only label records that have no label yet.
    Leave,
}

impl fmt::Display for OverwriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverwriteMode::Overwrite => f.write_str("overwrite"),
            OverwriteMode::Append => f.write_str("append"),
            OverwriteMode::Leave => f.write_str("leave"),
        }
    }
}

impl FromStr for OverwriteMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> PolicyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(OverwriteMode::Overwrite),
            "append" => Ok(OverwriteMode::Append),
            "leave" => Ok(OverwriteMode::Leave),
            _ => Err(PolicyError::unknown_option("overwrite mode", s)),
        }
    }
}

/// What to do with every record of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Write the label according to the overwrite mode.
    Add(OverwriteMode),
    /// Remove the label from records that carry it.
    Clear,
    /// Remove the records themselves. Irreversible.
    Delete,
}

impl Action {
    /// Parse the action and overwrite-mode fields of a caller request.
    ///
    /// The overwrite mode is required for `add` and ignored otherwise.
    pub fn parse(action: &str, overwrite: Option<&str>) -> PolicyResult<Self> {
        match action.trim().to_ascii_lowercase().as_str() {
            "add" => {
                let mode = overwrite
                    .ok_or_else(|| PolicyError::unknown_option("overwrite mode", ""))?
                    .parse()?;
                Ok(Action::Add(mode))
            }
            "clear" => Ok(Action::Clear),
            "delete" => Ok(Action::Delete),
            _ => Err(PolicyError::unknown_option("action", action)),
        }
    }

    /// The overwrite mode, for `add`.
    pub fn overwrite_mode(&self) -> Option<OverwriteMode> {
        match self {
            Action::Add(mode) => Some(*mode),
            _ => None,
        }
    }

    /// Returns true if the action needs a label.
    pub fn needs_label(&self) -> bool {
        !matches!(self, Action::Delete)
    }

    /// Returns true if applying the action cannot be undone by another action.
    pub fn is_irreversible(&self) -> bool {
        matches!(self, Action::Delete)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add(mode) => write!(f, "add ({mode})"),
            Action::Clear => f.write_str("clear"),
            Action::Delete => f.write_str("delete"),
        }
    }
}
