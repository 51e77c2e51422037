//! Label mutation plans.

use kin_core::{FamilyId, PersonId, RecordId};
use std::fmt;

use crate::action::{Action, OverwriteMode};

/// Why a record is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `leave` mode and the record already has a label.
    HasLabel { current: String },
    /// `append` mode and the label is already in the record's list.
    AlreadyLabeled,
    /// `clear` and the record does not carry the label.
    NoMatchingLabel,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HasLabel { current } => write!(f, "already labeled '{current}'"),
            SkipReason::AlreadyLabeled => f.write_str("label already present"),
            SkipReason::NoMatchingLabel => f.write_str("label not present"),
        }
    }
}

/// The change planned for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedChange {
    /// Replace the raw branch field `from` with `to`.
    Write { from: String, to: String },
    /// Remove the record.
    Delete,
    /// Leave the record as it is.
    Skip(SkipReason),
}

/// One record of the plan with its planned change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMutation {
    pub record: RecordId,
    pub change: PlannedChange,
}

impl PlannedMutation {
    /// Returns true if the record will be written or deleted.
    pub fn is_target(&self) -> bool {
        !matches!(self.change, PlannedChange::Skip(_))
    }
}

/// Every record of a branch with the change planned for it.
///
/// Entries follow membership order (persons, then families, each by id), so
/// the same inputs always produce the same plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMutationPlan {
    action: Action,
    label: String,
    mutations: Vec<PlannedMutation>,
    confirmed: bool,
}

impl LabelMutationPlan {
    pub(crate) fn new(action: Action, label: String, mutations: Vec<PlannedMutation>) -> Self {
        Self {
            action,
            label,
            mutations,
            confirmed: false,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn overwrite_mode(&self) -> Option<OverwriteMode> {
        self.action.overwrite_mode()
    }

    /// The branch label (empty for `delete`).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Every planned entry, skips included.
    pub fn mutations(&self) -> &[PlannedMutation] {
        &self.mutations
    }

    /// Total number of records covered by the plan.
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Entries that will be written or deleted.
    pub fn targets(&self) -> impl Iterator<Item = &PlannedMutation> + '_ {
        self.mutations.iter().filter(|m| m.is_target())
    }

    /// Entries that will be skipped.
    pub fn skips(&self) -> impl Iterator<Item = (&RecordId, &SkipReason)> + '_ {
        self.mutations.iter().filter_map(|m| match &m.change {
            PlannedChange::Skip(reason) => Some((&m.record, reason)),
            _ => None,
        })
    }

    /// Persons that will be written or deleted.
    pub fn target_person_ids(&self) -> impl Iterator<Item = &PersonId> + '_ {
        self.targets().filter_map(|m| m.record.as_person())
    }

    /// Families that will be written or deleted.
    pub fn target_family_ids(&self) -> impl Iterator<Item = &FamilyId> + '_ {
        self.targets().filter_map(|m| m.record.as_family())
    }

    /// Returns true if executing the plan cannot be undone.
    pub fn is_irreversible(&self) -> bool {
        self.action.is_irreversible()
    }

    /// Acknowledge that an irreversible plan may run.
    pub fn confirm_irreversible(mut self) -> Self {
        self.confirmed = true;
        self
    }

    /// Returns true if the plan may be executed without further confirmation.
    pub fn is_confirmed(&self) -> bool {
        !self.is_irreversible() || self.confirmed
    }
}
