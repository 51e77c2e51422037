//! Session configuration.

use kin_mutation::OrphanPolicy;
use kin_policy::IDENTIFIER_LABEL_PATTERN;
use kin_traversal::DEFAULT_MAX_GENERATIONS;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SessionError, SessionResult};

/// Configuration for a branch session.
///
/// Every key is optional in TOML; missing keys take the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Largest generation count accepted for any traversal direction
    pub max_generations: u32,
    /// What happens to families emptied by `delete`
    pub orphan_policy: OrphanPolicy,
    /// Pattern labels must match; empty for structural checks only
    pub label_pattern: String,
    /// Re-read each label before writing and fail the record if it changed
    pub verify_before_write: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_generations: DEFAULT_MAX_GENERATIONS,
            orphan_policy: OrphanPolicy::RemoveEmpty,
            label_pattern: IDENTIFIER_LABEL_PATTERN.to_string(),
            verify_before_write: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> SessionResult<Self> {
        toml::from_str(content).map_err(|e| SessionError::config(e.to_string()))
    }

    /// Load a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SessionError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    pub fn with_label_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.label_pattern = pattern.into();
        self
    }

    pub fn with_verify_before_write(mut self, verify: bool) -> Self {
        self.verify_before_write = verify;
        self
    }
}
