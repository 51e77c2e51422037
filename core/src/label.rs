//! Branch label lists.
//!
//! A record's branch field holds every branch it belongs to as a
//! comma-joined list (`"B1,B2"`). Entries are trimmed, empty entries are
//! dropped and duplicates collapse to their first occurrence, so parsing
//! then joining is stable.

use std::fmt;

/// Separator between branch identifiers in a raw branch field.
pub const LABEL_SEPARATOR: char = ',';

/// Parsed form of a raw branch field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchList {
    labels: Vec<String>,
}

impl BranchList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw branch field.
    pub fn parse(raw: &str) -> Self {
        let mut list = Self::new();
        for entry in raw.split(LABEL_SEPARATOR) {
            list.push(entry);
        }
        list
    }

    /// Returns true if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if `label` is one of the entries (exact match).
    pub fn contains(&self, label: &str) -> bool {
        let label = label.trim();
        self.labels.iter().any(|l| l == label)
    }

    /// Append `label` at the end unless already present.
    ///
    /// Returns true if the list changed.
    pub fn push(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    /// Remove `label`, keeping the order of the remaining entries.
    ///
    /// Returns true if the list changed.
    pub fn remove(&mut self, label: &str) -> bool {
        let label = label.trim();
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        self.labels.len() != before
    }

    /// Iterate over the labels in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Join back into a raw branch field.
    pub fn join(&self) -> String {
        let mut sep = [0u8; 4];
        self.labels.join(&*LABEL_SEPARATOR.encode_utf8(&mut sep))
    }
}

impl fmt::Display for BranchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}
