//! Record deletion with orphan handling.

use kin_core::{FamilyId, MutationStore, PersonId, RecordId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use super::OrphanPolicy;
use crate::result::{CascadeEffect, OperationResult};

/// Families outside the plan touched by a deletion.
#[derive(Debug, Default)]
struct Affected {
    /// Family -> true if a deleted person was one of its children.
    families: BTreeMap<FamilyId, bool>,
}

impl Affected {
    fn touch(&mut self, family: FamilyId, lost_child: bool) {
        let entry = self.families.entry(family).or_insert(false);
        *entry |= lost_child;
    }
}

/// Delete every person, then every family, then apply `policy` to the
/// families left behind.
pub(crate) fn execute_deletes<S: MutationStore + ?Sized>(
    store: &mut S,
    persons: &[PersonId],
    families: &[FamilyId],
    policy: OrphanPolicy,
    result: &mut OperationResult,
) {
    let planned: BTreeSet<&FamilyId> = families.iter().collect();
    let mut affected = Affected::default();

    for person in persons {
        // Capture relationships before the store detaches the person.
        collect_affected(store, person, &planned, &mut affected);

        let record = RecordId::Person(person.clone());
        match store.delete_record(&record) {
            Ok(()) => result.record_updated(record),
            Err(e) => {
                warn!(%record, error = %e, "delete failed");
                result.record_failed(record, e);
            }
        }
    }

    for family in families {
        let record = RecordId::Family(family.clone());
        match store.delete_record(&record) {
            Ok(()) => result.record_updated(record),
            Err(e) => {
                warn!(%record, error = %e, "delete failed");
                result.record_failed(record, e);
            }
        }
    }

    for (family, lost_child) in affected.families {
        apply_orphan_policy(store, family, lost_child, policy, result);
    }
}

fn collect_affected<S: MutationStore + ?Sized>(
    store: &S,
    person: &PersonId,
    planned: &BTreeSet<&FamilyId>,
    affected: &mut Affected,
) {
    let families = match store.families_of(person) {
        Ok(families) => families,
        Err(e) => {
            debug!(%person, error = %e, "no family links to inspect");
            return;
        }
    };

    for family in families {
        if planned.contains(&family) {
            continue;
        }
        let lost_child = store
            .family_record(&family)
            .map(|f| f.children.contains(person))
            .unwrap_or(false);
        affected.touch(family, lost_child);
    }
}

fn apply_orphan_policy<S: MutationStore + ?Sized>(
    store: &mut S,
    family: FamilyId,
    lost_child: bool,
    policy: OrphanPolicy,
    result: &mut OperationResult,
) {
    let record = match store.family_record(&family) {
        Ok(record) => record,
        Err(e) => {
            warn!(%family, error = %e, "orphan check failed");
            result.record_cascade(CascadeEffect::Failed { family, error: e });
            return;
        }
    };

    // Empty families are removed under either policy.
    let outcome = if record.is_empty() {
        store
            .delete_record(&RecordId::Family(family.clone()))
            .map(|()| CascadeEffect::FamilyRemoved(family.clone()))
    } else if policy == OrphanPolicy::MarkChildless && lost_child && record.children.is_empty() {
        store
            .mark_childless(&family)
            .map(|()| CascadeEffect::FamilyMarkedChildless(family.clone()))
    } else {
        return;
    };

    match outcome {
        Ok(effect) => {
            debug!(%family, %policy, "orphan policy applied");
            result.record_cascade(effect);
        }
        Err(error) => {
            warn!(%family, error = %error, "orphan policy failed");
            result.record_cascade(CascadeEffect::Failed { family, error });
        }
    }
}
