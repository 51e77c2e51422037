//! Indexes for efficient genealogy lookups.

use kin_core::{BranchList, FamilyId, PersonId, RecordId};
use std::collections::{BTreeSet, HashMap};

/// Membership index: PersonId -> Set<FamilyId>
///
/// Used twice: once for the families a person is a child of, once for the
/// families a person is a spouse in. Sets are ordered so lookups are
/// deterministic.
#[derive(Debug, Default)]
pub struct MembershipIndex {
    index: HashMap<PersonId, BTreeSet<FamilyId>>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, person: &PersonId, family: &FamilyId) {
        self.index
            .entry(person.clone())
            .or_default()
            .insert(family.clone());
    }

    pub fn remove(&mut self, person: &PersonId, family: &FamilyId) {
        if let Some(set) = self.index.get_mut(person) {
            set.remove(family);
            if set.is_empty() {
                self.index.remove(person);
            }
        }
    }

    /// Drop every entry for `person`, returning the families it was in.
    pub fn remove_person(&mut self, person: &PersonId) -> BTreeSet<FamilyId> {
        self.index.remove(person).unwrap_or_default()
    }

    pub fn get(&self, person: &PersonId) -> impl Iterator<Item = &FamilyId> + '_ {
        self.index.get(person).into_iter().flat_map(|set| set.iter())
    }

    pub fn first(&self, person: &PersonId) -> Option<&FamilyId> {
        self.index.get(person).and_then(|set| set.iter().next())
    }
}

/// Label index: branch label -> Set<RecordId>
///
/// Records are indexed under every entry of their branch list.
#[derive(Debug, Default)]
pub struct LabelIndex {
    index: HashMap<String, BTreeSet<RecordId>>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw: &str, record: &RecordId) {
        for label in BranchList::parse(raw).iter() {
            self.index
                .entry(label.to_string())
                .or_default()
                .insert(record.clone());
        }
    }

    pub fn remove(&mut self, raw: &str, record: &RecordId) {
        for label in BranchList::parse(raw).iter() {
            if let Some(set) = self.index.get_mut(label) {
                set.remove(record);
                if set.is_empty() {
                    self.index.remove(label);
                }
            }
        }
    }

    pub fn get(&self, label: &str) -> impl Iterator<Item = &RecordId> + '_ {
        self.index
            .get(label.trim())
            .into_iter()
            .flat_map(|set| set.iter())
    }
}
