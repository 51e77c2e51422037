//! Tree fixtures.

use kin_core::{Family, Person, PersonId, TreeId};
use kin_graph::Genealogy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ScenarioError, ScenarioResult};

/// Builder for small hand-written trees.
///
/// Persons are inserted before families, so declaration order does not matter.
#[derive(Debug, Clone)]
pub struct TreeFixture {
    tree: TreeId,
    persons: Vec<Person>,
    families: Vec<Family>,
}

impl TreeFixture {
    pub fn new(tree: impl Into<TreeId>) -> Self {
        Self {
            tree: tree.into(),
            persons: Vec::new(),
            families: Vec::new(),
        }
    }

    /// Add unlabeled persons.
    pub fn persons(mut self, ids: &[&str]) -> Self {
        self.persons.extend(ids.iter().map(|id| Person::new(*id)));
        self
    }

    /// Add a person with a raw branch field.
    pub fn labeled(mut self, id: &str, branch: &str) -> Self {
        self.persons.push(Person::new(id).with_branch(branch));
        self
    }

    /// Add a family. An empty husband or wife id leaves the slot open.
    pub fn family(mut self, id: &str, husband: &str, wife: &str, children: &[&str]) -> Self {
        let mut family = Family::new(id);
        if !husband.is_empty() {
            family = family.with_husband(husband);
        }
        if !wife.is_empty() {
            family = family.with_wife(wife);
        }
        for child in children {
            family = family.with_child(*child);
        }
        self.families.push(family);
        self
    }

    /// Set the raw branch field of the most recently added family.
    pub fn family_labeled(mut self, branch: &str) -> Self {
        if let Some(family) = self.families.pop() {
            self.families.push(family.with_branch(branch));
        }
        self
    }

    pub fn build(self) -> ScenarioResult<Genealogy> {
        let mut genealogy = Genealogy::new(self.tree);
        for person in self.persons {
            genealogy.insert_person(person);
        }
        for family in self.families {
            let id = family.id.clone();
            genealogy
                .insert_family(family)
                .map_err(|e| ScenarioError::fixture(format!("family {id}: {e}")))?;
        }
        Ok(genealogy)
    }
}

/// The reference tree used across integration tests.
///
/// ```text
/// G1 + G2 -> P2            G3 + G4 -> P3
/// P2 + P3 -> P1, A1        (F1)
/// P2 + S1 -> H1            (F3, half-sibling line)
/// P1 + W1 -> C1, C2        (F2)
/// C1 + W2 -> GC1           (F4)
/// ```
pub fn sample_tree() -> TreeFixture {
    TreeFixture::new("T1")
        .persons(&[
            "G1", "G2", "G3", "G4", "P1", "P2", "P3", "A1", "S1", "H1", "W1", "C1", "C2", "W2",
            "GC1",
        ])
        .family("F10", "G1", "G2", &["P2"])
        .family("F11", "G3", "G4", &["P3"])
        .family("F1", "P2", "P3", &["P1", "A1"])
        .family("F3", "P2", "S1", &["H1"])
        .family("F2", "P1", "W1", &["C1", "C2"])
        .family("F4", "C1", "W2", &["GC1"])
}

/// Parents-only tree: P2 + P3 -> P1, with P2 labeled OLD.
pub fn nuclear_family() -> TreeFixture {
    TreeFixture::new("T1")
        .persons(&["P1", "P3"])
        .labeled("P2", "OLD")
        .family("F1", "P2", "P3", &["P1"])
}

/// A randomly generated multi-generation tree.
#[derive(Debug)]
pub struct Pedigree {
    pub tree: Genealogy,
    /// Generation number of every person; spouses marrying in share their partner's.
    pub generation: BTreeMap<PersonId, u32>,
    /// Husband and wife of each person's birth family.
    pub parents: BTreeMap<PersonId, (PersonId, PersonId)>,
    /// Persons of the last generation.
    pub youngest: Vec<PersonId>,
}

impl Pedigree {
    /// Persons reachable by going up at most `levels` parent links from `root`.
    pub fn ancestors_within(&self, root: &PersonId, levels: u32) -> Vec<PersonId> {
        let mut found = BTreeSet::new();
        let mut frontier = vec![root.clone()];
        for _ in 0..levels {
            let mut next = Vec::new();
            for person in &frontier {
                if let Some((husband, wife)) = self.parents.get(person) {
                    for parent in [husband, wife] {
                        if found.insert(parent.clone()) {
                            next.push(parent.clone());
                        }
                    }
                }
            }
            frontier = next;
        }
        found.into_iter().collect()
    }
}

const MAX_GENERATION_WIDTH: usize = 24;

/// Id allocation and bookkeeping while a pedigree is generated.
struct PedigreeBuilder {
    fixture: TreeFixture,
    generation: BTreeMap<PersonId, u32>,
    parents: BTreeMap<PersonId, (PersonId, PersonId)>,
    persons: usize,
    families: usize,
}

impl PedigreeBuilder {
    fn person(&mut self, gen: u32) -> PersonId {
        self.persons += 1;
        let id = PersonId::new(format!("I{:04}", self.persons));
        self.fixture.persons.push(Person::new(id.clone()));
        self.generation.insert(id.clone(), gen);
        id
    }

    fn family(&mut self, husband: &PersonId, wife: &PersonId, children: &[PersonId]) {
        self.families += 1;
        let mut family = Family::new(format!("R{:04}", self.families))
            .with_husband(husband.clone())
            .with_wife(wife.clone());
        for child in children {
            family = family.with_child(child.clone());
            self.parents
                .insert(child.clone(), (husband.clone(), wife.clone()));
        }
        self.fixture.families.push(family);
    }
}

/// Generate a pedigree of `generations` generations from `seed`.
///
/// Members of a generation pair up at random, so siblings and cousins may
/// marry and the same ancestor can be reached along several paths.
pub fn random_pedigree(seed: u64, generations: u32) -> ScenarioResult<Pedigree> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = PedigreeBuilder {
        fixture: TreeFixture::new("R"),
        generation: BTreeMap::new(),
        parents: BTreeMap::new(),
        persons: 0,
        families: 0,
    };

    let mut current: Vec<PersonId> = (0..4).map(|_| builder.person(0)).collect();

    for gen in 1..=generations {
        let mut pool = current.clone();
        pool.shuffle(&mut rng);
        pool.truncate(MAX_GENERATION_WIDTH);

        let mut children = Vec::new();
        while let Some(husband) = pool.pop() {
            let wife = if !pool.is_empty() && rng.gen_bool(0.7) {
                pool.pop()
            } else {
                None
            };
            let wife = wife.unwrap_or_else(|| builder.person(gen - 1));

            let kids: Vec<PersonId> = (0..rng.gen_range(1..=3))
                .map(|_| builder.person(gen))
                .collect();
            builder.family(&husband, &wife, &kids);
            children.extend(kids);
        }
        current = children;
    }

    Ok(Pedigree {
        tree: builder.fixture.build()?,
        generation: builder.generation,
        parents: builder.parents,
        youngest: current,
    })
}
