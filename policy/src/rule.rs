//! Branch label validation.

use kin_core::LABEL_SEPARATOR;
use regex_lite::Regex;

use crate::error::{PolicyError, PolicyResult};

/// Pattern used by deployments that restrict labels to identifier characters.
pub const IDENTIFIER_LABEL_PATTERN: &str = r"^[A-Za-z0-9_.-]+$";

/// Accepts or rejects branch labels before a plan is built.
///
/// Structural checks always apply: a label cannot be blank, cannot contain
/// the list separator and cannot carry surrounding whitespace. An optional
/// pattern narrows it further.
#[derive(Debug, Clone, Default)]
pub struct LabelRule {
    pattern: Option<Regex>,
}

impl LabelRule {
    /// Structural checks only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Structural checks plus `pattern`.
    pub fn with_pattern(pattern: &str) -> PolicyResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| PolicyError::invalid_pattern(pattern, e.to_string()))?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    /// Check `label`.
    pub fn check(&self, label: &str) -> PolicyResult<()> {
        if label.contains(LABEL_SEPARATOR) {
            return Err(PolicyError::invalid_label(
                label,
                format!("must not contain '{LABEL_SEPARATOR}'"),
            ));
        }
        if label.trim() != label {
            return Err(PolicyError::invalid_label(
                label,
                "must not start or end with whitespace",
            ));
        }
        if let Some(regex) = &self.pattern {
            if !regex.is_match(label) {
                return Err(PolicyError::invalid_label(
                    label,
                    format!("must match {}", regex.as_str()),
                ));
            }
        }
        Ok(())
    }
}
