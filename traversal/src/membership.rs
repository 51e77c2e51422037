//! Branch membership types.

use kin_core::{FamilyId, PersonId, RecordId};
use std::collections::BTreeSet;
use std::fmt;

/// The persons and families that belong to a branch.
///
/// Both sets are ordered, so iterating a membership set is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSet {
    /// Member persons.
    pub persons: BTreeSet<PersonId>,
    /// Member families.
    pub families: BTreeSet<FamilyId>,
}

impl MembershipSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if neither persons nor families are present.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.families.is_empty()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.persons.len() + self.families.len()
    }

    pub fn contains_person(&self, id: &PersonId) -> bool {
        self.persons.contains(id)
    }

    pub fn contains_family(&self, id: &FamilyId) -> bool {
        self.families.contains(id)
    }

    pub fn contains(&self, record: &RecordId) -> bool {
        match record {
            RecordId::Person(id) => self.contains_person(id),
            RecordId::Family(id) => self.contains_family(id),
        }
    }

    /// Add a person; returns true if it was not present.
    pub fn insert_person(&mut self, id: PersonId) -> bool {
        self.persons.insert(id)
    }

    /// Add a family; returns true if it was not present.
    pub fn insert_family(&mut self, id: FamilyId) -> bool {
        self.families.insert(id)
    }

    /// Iterate over every record, persons first, each group in id order.
    pub fn records(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.persons
            .iter()
            .cloned()
            .map(RecordId::Person)
            .chain(self.families.iter().cloned().map(RecordId::Family))
    }
}

impl FromIterator<RecordId> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            match record {
                RecordId::Person(id) => set.insert_person(id),
                RecordId::Family(id) => set.insert_family(id),
            };
        }
        set
    }
}

/// One phase of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Ancestors,
    DescendantsOfAncestors,
    Descendants,
    Spouses,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Ancestors => f.write_str("ancestors"),
            Pass::DescendantsOfAncestors => f.write_str("descendants-of-ancestors"),
            Pass::Descendants => f.write_str("descendants"),
            Pass::Spouses => f.write_str("spouses"),
        }
    }
}

/// Statistics for one completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub pass: Pass,
    /// Deepest generation that produced at least one new person.
    pub generations_reached: u32,
    /// Persons first reached by this pass.
    pub persons_added: usize,
}

/// A person found to be its own ancestor or descendant.
///
/// Traversal through the offending edge stops; the rest of the walk goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub pass: Pass,
    /// Person that closed the loop.
    pub person: PersonId,
    /// Family edge that led back to it.
    pub via: FamilyId,
}

/// Output of a traversal: the branch members plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub members: MembershipSet,
    pub passes: Vec<PassSummary>,
    pub cycles: Vec<CycleReport>,
}

impl Membership {
    /// Returns true if any data cycle was detected.
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}
