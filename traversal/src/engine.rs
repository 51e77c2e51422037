//! Level-bounded breadth-first branch traversal.
//!
//! The walk runs four passes over a read-only graph:
//! 1. ancestors of the root, up to `ancestor_generations`
//! 2. descendants of those ancestors, up to `descendant_of_ancestor_generations`
//! 3. descendants of the root, up to `descendant_generations`
//! 4. direct spouses of everyone visited so far, when `include_spouses` is set
//!
//! Results are unioned into one membership set. Cancellation is checked
//! before each generation.

use kin_core::{Family, FamilyId, GraphAccessor, PersonId, TreeId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::error::{TraversalError, TraversalResult};
use crate::membership::{CycleReport, Membership, MembershipSet, Pass, PassSummary};
use crate::spec::{BranchSpec, DEFAULT_MAX_GENERATIONS};

/// Compute branch membership with default limits and no cancellation.
pub fn compute_membership<G: GraphAccessor + ?Sized>(
    graph: &G,
    spec: &BranchSpec,
) -> TraversalResult<Membership> {
    TraversalEngine::new(graph).compute(spec)
}

/// Traversal engine bound to one graph snapshot.
pub struct TraversalEngine<'g, G: ?Sized> {
    graph: &'g G,
    max_generations: u32,
    cancel: Option<CancelToken>,
}

impl<'g, G: GraphAccessor + ?Sized> TraversalEngine<'g, G> {
    /// Create an engine over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_generations: DEFAULT_MAX_GENERATIONS,
            cancel: None,
        }
    }

    /// Reject specs with any generation count above `max`.
    pub fn with_max_generations(mut self, max: u32) -> Self {
        self.max_generations = max;
        self
    }

    /// Check `token` between generations.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Compute the membership of the branch described by `spec`.
    pub fn compute(&self, spec: &BranchSpec) -> TraversalResult<Membership> {
        spec.validate(self.max_generations)?;

        // Existence probe: a missing root surfaces as a graph read error.
        self.graph.parent_family(&spec.tree, &spec.root)?;

        let mut walk = Walk::new(self.graph, &spec.tree, self.cancel.as_ref());
        walk.members.insert_person(spec.root.clone());

        let ancestors = walk.ancestors(&spec.root, spec.ancestor_generations)?;
        if !ancestors.is_empty() {
            walk.descend(
                Pass::DescendantsOfAncestors,
                &ancestors,
                spec.descendant_of_ancestor_generations,
            )?;
        }
        walk.descend(
            Pass::Descendants,
            std::slice::from_ref(&spec.root),
            spec.descendant_generations,
        )?;
        if spec.include_spouses {
            walk.spouses()?;
        }

        debug!(
            tree = %spec.tree,
            root = %spec.root,
            persons = walk.members.persons.len(),
            families = walk.members.families.len(),
            cycles = walk.cycles.len(),
            "branch membership computed"
        );

        Ok(Membership {
            members: walk.members,
            passes: walk.passes,
            cycles: walk.cycles,
        })
    }
}

/// Mutable state of one traversal.
struct Walk<'a, G: ?Sized> {
    graph: &'a G,
    tree: &'a TreeId,
    cancel: Option<&'a CancelToken>,
    /// Families read so far; the graph is a snapshot, so reads are cached.
    families: HashMap<FamilyId, Family>,
    members: MembershipSet,
    passes: Vec<PassSummary>,
    cycles: Vec<CycleReport>,
}

impl<'a, G: GraphAccessor + ?Sized> Walk<'a, G> {
    fn new(graph: &'a G, tree: &'a TreeId, cancel: Option<&'a CancelToken>) -> Self {
        Self {
            graph,
            tree,
            cancel,
            families: HashMap::new(),
            members: MembershipSet::new(),
            passes: Vec::new(),
            cycles: Vec::new(),
        }
    }

    fn check_cancel(&self, pass: Pass) -> TraversalResult<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => {
                debug!(tree = %self.tree, %pass, "traversal cancelled");
                Err(TraversalError::cancelled(pass, self.members.clone()))
            }
            _ => Ok(()),
        }
    }

    fn family(&mut self, id: &FamilyId) -> TraversalResult<Family> {
        if let Some(family) = self.families.get(id) {
            return Ok(family.clone());
        }
        let family = self.graph.family(self.tree, id)?;
        self.families.insert(id.clone(), family.clone());
        Ok(family)
    }

    fn report_cycle(&mut self, pass: Pass, person: &PersonId, via: &FamilyId) {
        warn!(
            tree = %self.tree,
            %pass,
            person = %person,
            family = %via,
            "cycle detected, edge not followed"
        );
        self.cycles.push(CycleReport {
            pass,
            person: person.clone(),
            via: via.clone(),
        });
    }

    fn finish_pass(&mut self, pass: Pass, generations_reached: u32, persons_added: usize) {
        debug!(
            tree = %self.tree,
            %pass,
            generations_reached,
            persons_added,
            "pass complete"
        );
        self.passes.push(PassSummary {
            pass,
            generations_reached,
            persons_added,
        });
    }

    /// Walk upward from `root`. Returns every ancestor found, root excluded.
    fn ancestors(&mut self, root: &PersonId, bound: u32) -> TraversalResult<Vec<PersonId>> {
        let pass = Pass::Ancestors;
        let mut found = Vec::new();
        let mut visited: HashSet<PersonId> = HashSet::from([root.clone()]);
        // ancestor -> the child it was reached from
        let mut reached_from: HashMap<PersonId, PersonId> = HashMap::new();
        let mut frontier = vec![root.clone()];
        let mut reached = 0;
        let mut added = 0;

        for generation in 1..=bound {
            self.check_cancel(pass)?;
            let mut next = Vec::new();

            for person in &frontier {
                let Some(family_id) = self.graph.parent_family(self.tree, person)? else {
                    continue;
                };
                let family = self.family(&family_id)?;
                self.members.insert_family(family_id.clone());

                for parent in family.spouses() {
                    if visited.contains(parent) {
                        if on_chain(&reached_from, person, parent) {
                            self.report_cycle(pass, parent, &family_id);
                        }
                        continue;
                    }
                    visited.insert(parent.clone());
                    reached_from.insert(parent.clone(), person.clone());
                    if self.members.insert_person(parent.clone()) {
                        added += 1;
                    }
                    found.push(parent.clone());
                    next.push(parent.clone());
                }
            }

            if next.is_empty() {
                break;
            }
            reached = generation;
            frontier = next;
        }

        self.finish_pass(pass, reached, added);
        Ok(found)
    }

    /// Walk downward from every seed at once.
    ///
    /// A person reachable from several seeds is taken at its shortest
    /// distance, so each seed's bound is honoured.
    fn descend(&mut self, pass: Pass, seeds: &[PersonId], bound: u32) -> TraversalResult<()> {
        let mut visited: HashSet<PersonId> = seeds.iter().cloned().collect();
        // child -> the parent it was reached from
        let mut reached_from: HashMap<PersonId, PersonId> = HashMap::new();
        let mut frontier = seeds.to_vec();
        let mut reached = 0;
        let mut added = 0;

        for generation in 1..=bound {
            self.check_cancel(pass)?;
            let mut next = Vec::new();

            for person in &frontier {
                for family_id in self.graph.spouse_families(self.tree, person)? {
                    let family = self.family(&family_id)?;
                    self.members.insert_family(family_id.clone());

                    for child in &family.children {
                        if visited.contains(child) {
                            if on_chain(&reached_from, person, child) {
                                self.report_cycle(pass, child, &family_id);
                            }
                            continue;
                        }
                        visited.insert(child.clone());
                        reached_from.insert(child.clone(), person.clone());
                        if self.members.insert_person(child.clone()) {
                            added += 1;
                        }
                        next.push(child.clone());
                    }
                }
            }

            if next.is_empty() {
                break;
            }
            reached = generation;
            frontier = next;
        }

        self.finish_pass(pass, reached, added);
        Ok(())
    }

    /// Add the direct spouses of every person visited so far.
    ///
    /// Spouses are leaves: nothing is walked from them.
    fn spouses(&mut self) -> TraversalResult<()> {
        let pass = Pass::Spouses;
        self.check_cancel(pass)?;
        let visited: Vec<PersonId> = self.members.persons.iter().cloned().collect();
        let mut added = 0;

        for person in &visited {
            for family_id in self.graph.spouse_families(self.tree, person)? {
                let family = self.family(&family_id)?;
                self.members.insert_family(family_id.clone());
                if let Some(partner) = family.partner_of(person) {
                    if self.members.insert_person(partner.clone()) {
                        added += 1;
                    }
                }
            }
        }

        self.finish_pass(pass, u32::from(!visited.is_empty()), added);
        Ok(())
    }
}

/// Returns true if `target` lies on the chain of predecessors from `from`.
///
/// Walking the chain from the current person back toward the seed finds
/// whether the edge being followed loops back into the current lineage.
fn on_chain(reached_from: &HashMap<PersonId, PersonId>, from: &PersonId, target: &PersonId) -> bool {
    let mut current = from;
    loop {
        if current == target {
            return true;
        }
        match reached_from.get(current) {
            Some(previous) => current = previous,
            None => return false,
        }
    }
}
