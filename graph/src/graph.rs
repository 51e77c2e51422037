//! Core genealogy storage implementation.

use crate::index::{LabelIndex, MembershipIndex};
use kin_core::{
    Family, FamilyId, GraphAccessor, GraphError, GraphResult, MutationStore, Person, PersonId,
    RecordId, StoreError, StoreResult, TreeId,
};
use std::collections::HashMap;

/// The in-memory genealogy storage for one tree.
#[derive(Debug)]
pub struct Genealogy {
    /// Tree served by this storage
    tree: TreeId,
    /// Person storage
    persons: HashMap<PersonId, Person>,
    /// Family storage
    families: HashMap<FamilyId, Family>,
    /// Families each person is a child of
    parent_index: MembershipIndex,
    /// Families each person is a spouse in
    spouse_index: MembershipIndex,
    /// Branch label index
    label_index: LabelIndex,
}

impl Genealogy {
    /// Create a new empty tree.
    pub fn new(tree: impl Into<TreeId>) -> Self {
        Self {
            tree: tree.into(),
            persons: HashMap::new(),
            families: HashMap::new(),
            parent_index: MembershipIndex::new(),
            spouse_index: MembershipIndex::new(),
            label_index: LabelIndex::new(),
        }
    }

    /// Get the tree served by this storage.
    pub fn tree(&self) -> &TreeId {
        &self.tree
    }

    // ==================== Person Operations ====================

    /// Insert a person, replacing any existing record with the same id.
    pub fn insert_person(&mut self, person: Person) {
        let record = RecordId::Person(person.id.clone());
        if let Some(old) = self.persons.get(&person.id) {
            self.label_index.remove(&old.branch, &record);
        }
        self.label_index.insert(&person.branch, &record);
        self.persons.insert(person.id.clone(), person);
    }

    /// Get a person by ID.
    pub fn get_person(&self, id: &PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Delete a person and detach it from every family that references it.
    pub fn delete_person(&mut self, id: &PersonId) -> GraphResult<Person> {
        let person = self
            .persons
            .remove(id)
            .ok_or_else(|| GraphError::PersonNotFound(id.clone()))?;

        let mut touched = self.parent_index.remove_person(id);
        touched.extend(self.spouse_index.remove_person(id));
        for family_id in touched {
            if let Some(family) = self.families.get_mut(&family_id) {
                family.detach(id);
            }
        }

        self.label_index
            .remove(&person.branch, &RecordId::Person(id.clone()));
        Ok(person)
    }

    // ==================== Family Operations ====================

    /// Insert a family, replacing any existing record with the same id.
    ///
    /// Every referenced person must already exist.
    pub fn insert_family(&mut self, family: Family) -> GraphResult<()> {
        for member in family.spouses().chain(family.children.iter()) {
            if !self.persons.contains_key(member) {
                return Err(GraphError::PersonNotFound(member.clone()));
            }
        }

        if self.families.contains_key(&family.id) {
            self.delete_family(&family.id)?;
        }

        for spouse in family.spouses() {
            self.spouse_index.insert(spouse, &family.id);
        }
        for child in &family.children {
            self.parent_index.insert(child, &family.id);
        }
        self.label_index
            .insert(&family.branch, &RecordId::Family(family.id.clone()));
        self.families.insert(family.id.clone(), family);
        Ok(())
    }

    /// Get a family by ID.
    pub fn get_family(&self, id: &FamilyId) -> Option<&Family> {
        self.families.get(id)
    }

    /// Delete a family, unlinking its spouses and children.
    pub fn delete_family(&mut self, id: &FamilyId) -> GraphResult<Family> {
        let family = self
            .families
            .remove(id)
            .ok_or_else(|| GraphError::FamilyNotFound(id.clone()))?;

        for spouse in family.spouses() {
            self.spouse_index.remove(spouse, id);
        }
        for child in &family.children {
            self.parent_index.remove(child, id);
        }
        self.label_index
            .remove(&family.branch, &RecordId::Family(id.clone()));
        Ok(family)
    }

    // ==================== Label Operations ====================

    /// Get the raw branch field of a record.
    pub fn label(&self, record: &RecordId) -> Option<&str> {
        match record {
            RecordId::Person(id) => self.persons.get(id).map(|p| p.branch.as_str()),
            RecordId::Family(id) => self.families.get(id).map(|f| f.branch.as_str()),
        }
    }

    /// Replace the raw branch field of a record.
    pub fn set_label(&mut self, record: &RecordId, branch: &str) -> bool {
        let slot = match record {
            RecordId::Person(id) => self.persons.get_mut(id).map(|p| &mut p.branch),
            RecordId::Family(id) => self.families.get_mut(id).map(|f| &mut f.branch),
        };
        let Some(slot) = slot else {
            return false;
        };

        self.label_index.remove(slot.as_str(), record);
        *slot = branch.to_string();
        self.label_index.insert(branch, record);
        true
    }

    /// Find records whose branch list contains `label`.
    pub fn records_with_label(&self, label: &str) -> impl Iterator<Item = &RecordId> + '_ {
        self.label_index.get(label)
    }

    // ==================== Statistics ====================

    /// Get the number of persons in the tree.
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Get the number of families in the tree.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    fn check_tree(&self, tree: &TreeId) -> GraphResult<()> {
        if tree != &self.tree {
            return Err(GraphError::tree_mismatch(tree, &self.tree));
        }
        Ok(())
    }

    fn check_person(&self, person: &PersonId) -> GraphResult<()> {
        if !self.persons.contains_key(person) {
            return Err(GraphError::PersonNotFound(person.clone()));
        }
        Ok(())
    }
}

impl GraphAccessor for Genealogy {
    fn parent_family(&self, tree: &TreeId, person: &PersonId) -> GraphResult<Option<FamilyId>> {
        self.check_tree(tree)?;
        self.check_person(person)?;
        Ok(self.parent_index.first(person).cloned())
    }

    fn spouse_families(&self, tree: &TreeId, person: &PersonId) -> GraphResult<Vec<FamilyId>> {
        self.check_tree(tree)?;
        self.check_person(person)?;
        Ok(self.spouse_index.get(person).cloned().collect())
    }

    fn family(&self, tree: &TreeId, family: &FamilyId) -> GraphResult<Family> {
        self.check_tree(tree)?;
        self.families
            .get(family)
            .cloned()
            .ok_or_else(|| GraphError::FamilyNotFound(family.clone()))
    }
}

impl MutationStore for Genealogy {
    fn read_label(&self, record: &RecordId) -> StoreResult<String> {
        self.label(record)
            .map(str::to_string)
            .ok_or_else(|| StoreError::RecordNotFound(record.clone()))
    }

    fn write_label(&mut self, record: &RecordId, label: &str) -> StoreResult<()> {
        if self.set_label(record, label) {
            Ok(())
        } else {
            Err(StoreError::RecordNotFound(record.clone()))
        }
    }

    fn delete_record(&mut self, record: &RecordId) -> StoreResult<()> {
        let deleted = match record {
            RecordId::Person(id) => self.delete_person(id).map(|_| ()),
            RecordId::Family(id) => self.delete_family(id).map(|_| ()),
        };
        deleted.map_err(|_| StoreError::RecordNotFound(record.clone()))
    }

    fn families_of(&self, person: &PersonId) -> StoreResult<Vec<FamilyId>> {
        if !self.persons.contains_key(person) {
            return Err(StoreError::RecordNotFound(RecordId::Person(person.clone())));
        }
        let mut families: Vec<FamilyId> = self
            .parent_index
            .get(person)
            .chain(self.spouse_index.get(person))
            .cloned()
            .collect();
        families.sort();
        families.dedup();
        Ok(families)
    }

    fn family_record(&self, family: &FamilyId) -> StoreResult<Family> {
        self.families
            .get(family)
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound(RecordId::Family(family.clone())))
    }

    fn mark_childless(&mut self, family: &FamilyId) -> StoreResult<()> {
        let record = self
            .families
            .get_mut(family)
            .ok_or_else(|| StoreError::RecordNotFound(RecordId::Family(family.clone())))?;
        record.childless = true;
        Ok(())
    }
}
