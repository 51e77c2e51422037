//! Policy error types.

use thiserror::Error;

/// Result type for plan construction.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors that can occur while building a label mutation plan.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("A branch label is required for {action}")]
    MissingLabel { action: String },

    #[error("Invalid branch label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("Invalid label pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unknown {field}: '{value}'")]
    UnknownOption { field: String, value: String },
}

impl PolicyError {
    pub fn missing_label(action: impl Into<String>) -> Self {
        Self::MissingLabel {
            action: action.into(),
        }
    }

    pub fn invalid_label(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLabel {
            label: label.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn unknown_option(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownOption {
            field: field.into(),
            value: value.into(),
        }
    }
}
