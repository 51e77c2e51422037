//! Identity types for genealogy records.
//!
//! Identifiers are opaque strings assigned by the record-management layer:
//! - Unique within their tree and namespace
//! - Immutable once assigned
//! - Compared and ordered lexically

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a raw value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the raw value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a genealogy tree. Every other identifier is scoped to one tree.
    TreeId
);

string_id!(
    /// Unique identifier for a person within a tree.
    PersonId
);

string_id!(
    /// Unique identifier for a family (one marriage or partnership) within a tree.
    FamilyId
);

string_id!(
    /// Identifier of a registered branch definition within a tree.
    BranchId
);

/// The kind of record a branch label can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Person,
    Family,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Person => f.write_str("person"),
            RecordKind::Family => f.write_str("family"),
        }
    }
}

/// Unified identifier that can refer to either a person or a family.
///
/// Ordering puts every person before every family, then orders by raw id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    Person(PersonId),
    Family(FamilyId),
}

impl RecordId {
    /// Get the record kind.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordId::Person(_) => RecordKind::Person,
            RecordId::Family(_) => RecordKind::Family,
        }
    }

    /// Get the raw identifier without its kind.
    pub fn as_str(&self) -> &str {
        match self {
            RecordId::Person(id) => id.as_str(),
            RecordId::Family(id) => id.as_str(),
        }
    }

    /// Get as a PersonId if this is a person reference.
    pub fn as_person(&self) -> Option<&PersonId> {
        match self {
            RecordId::Person(id) => Some(id),
            RecordId::Family(_) => None,
        }
    }

    /// Get as a FamilyId if this is a family reference.
    pub fn as_family(&self) -> Option<&FamilyId> {
        match self {
            RecordId::Person(_) => None,
            RecordId::Family(id) => Some(id),
        }
    }
}

impl From<PersonId> for RecordId {
    fn from(id: PersonId) -> Self {
        RecordId::Person(id)
    }
}

impl From<FamilyId> for RecordId {
    fn from(id: FamilyId) -> Self {
        RecordId::Family(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}
