//! Record structures for a genealogy tree.
//!
//! Persons and families are the two record kinds that carry a branch label.
//! Parent/child and spouse relationships live on the family record.

use crate::{FamilyId, PersonId};

/// A person in a genealogy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique identifier for this person.
    pub id: PersonId,
    /// Raw branch field (comma-joined branch list, empty when unlabeled).
    pub branch: String,
}

impl Person {
    /// Create an unlabeled person.
    pub fn new(id: impl Into<PersonId>) -> Self {
        Self {
            id: id.into(),
            branch: String::new(),
        }
    }

    /// Set the initial branch field.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }
}

/// A family: one marriage or partnership and the children born to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    /// Unique identifier for this family.
    pub id: FamilyId,
    /// Husband slot (may be absent).
    pub husband: Option<PersonId>,
    /// Wife slot (may be absent).
    pub wife: Option<PersonId>,
    /// Ordered list of children.
    pub children: Vec<PersonId>,
    /// Raw branch field (comma-joined branch list, empty when unlabeled).
    pub branch: String,
    /// Set when every child of this family has been deleted.
    pub childless: bool,
}

impl Family {
    /// Create an empty family.
    pub fn new(id: impl Into<FamilyId>) -> Self {
        Self {
            id: id.into(),
            husband: None,
            wife: None,
            children: Vec::new(),
            branch: String::new(),
            childless: false,
        }
    }

    pub fn with_husband(mut self, id: impl Into<PersonId>) -> Self {
        self.husband = Some(id.into());
        self
    }

    pub fn with_wife(mut self, id: impl Into<PersonId>) -> Self {
        self.wife = Some(id.into());
        self
    }

    pub fn with_child(mut self, id: impl Into<PersonId>) -> Self {
        self.children.push(id.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Iterate over the occupied spouse slots (husband first).
    pub fn spouses(&self) -> impl Iterator<Item = &PersonId> + '_ {
        self.husband.iter().chain(self.wife.iter())
    }

    /// Get the other spouse of `person`, if `person` occupies a spouse slot
    /// and the other slot is filled.
    pub fn partner_of(&self, person: &PersonId) -> Option<&PersonId> {
        if self.husband.as_ref() == Some(person) {
            self.wife.as_ref()
        } else if self.wife.as_ref() == Some(person) {
            self.husband.as_ref()
        } else {
            None
        }
    }

    /// Returns true if `person` is a spouse in this family.
    pub fn is_spouse(&self, person: &PersonId) -> bool {
        self.spouses().any(|p| p == person)
    }

    /// Returns true if `person` is a spouse or child in this family.
    pub fn involves(&self, person: &PersonId) -> bool {
        self.is_spouse(person) || self.children.contains(person)
    }

    /// Returns true if no spouse slot is filled and there are no children.
    pub fn is_empty(&self) -> bool {
        self.husband.is_none() && self.wife.is_none() && self.children.is_empty()
    }

    /// Remove `person` from every slot it occupies.
    ///
    /// Returns true if anything was removed.
    pub fn detach(&mut self, person: &PersonId) -> bool {
        let mut removed = false;
        if self.husband.as_ref() == Some(person) {
            self.husband = None;
            removed = true;
        }
        if self.wife.as_ref() == Some(person) {
            self.wife = None;
            removed = true;
        }
        let before = self.children.len();
        self.children.retain(|c| c != person);
        removed || self.children.len() != before
    }
}
