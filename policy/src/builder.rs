//! Plan construction.
//!
//! Building a plan is a pure function of the membership set, the action,
//! the label and the records' current labels. Nothing is read or written
//! here; the caller supplies current labels and the executor applies the
//! result.

use kin_core::{BranchList, RecordId};
use kin_traversal::MembershipSet;
use std::collections::HashMap;
use tracing::debug;

use crate::action::{Action, OverwriteMode};
use crate::error::{PolicyError, PolicyResult};
use crate::plan::{LabelMutationPlan, PlannedChange, PlannedMutation, SkipReason};
use crate::rule::LabelRule;

/// Raw branch fields keyed by record. A missing entry means unlabeled.
pub type CurrentLabels = HashMap<RecordId, String>;

/// Build a plan with structural label checks only.
pub fn build_plan(
    membership: &MembershipSet,
    action: Action,
    label: &str,
    current: &CurrentLabels,
) -> PolicyResult<LabelMutationPlan> {
    LabelPolicy::default().build_plan(membership, action, label, current)
}

/// Plan builder with a configurable label rule.
#[derive(Debug, Clone, Default)]
pub struct LabelPolicy {
    rule: LabelRule,
}

impl LabelPolicy {
    pub fn new(rule: LabelRule) -> Self {
        Self { rule }
    }

    /// Decide the change for every record of `membership`.
    pub fn build_plan(
        &self,
        membership: &MembershipSet,
        action: Action,
        label: &str,
        current: &CurrentLabels,
    ) -> PolicyResult<LabelMutationPlan> {
        let label = if action.needs_label() {
            if label.trim().is_empty() {
                return Err(PolicyError::missing_label(action.to_string()));
            }
            self.rule.check(label)?;
            label.to_string()
        } else {
            String::new()
        };

        let mutations: Vec<PlannedMutation> = membership
            .records()
            .map(|record| {
                let existing = current.get(&record).map(String::as_str).unwrap_or("");
                let change = plan_change(action, &label, existing);
                PlannedMutation { record, change }
            })
            .collect();

        let plan = LabelMutationPlan::new(action, label, mutations);
        debug!(
            %action,
            label = plan.label(),
            records = plan.len(),
            targets = plan.targets().count(),
            "label plan built"
        );
        Ok(plan)
    }
}

fn plan_change(action: Action, label: &str, existing: &str) -> PlannedChange {
    let write = |to: String| PlannedChange::Write {
        from: existing.to_string(),
        to,
    };

    match action {
        Action::Add(OverwriteMode::Overwrite) => write(label.to_string()),
        Action::Add(OverwriteMode::Append) => {
            let mut list = BranchList::parse(existing);
            if list.push(label) {
                write(list.join())
            } else {
                PlannedChange::Skip(SkipReason::AlreadyLabeled)
            }
        }
        Action::Add(OverwriteMode::Leave) => {
            if BranchList::parse(existing).is_empty() {
                write(label.to_string())
            } else {
                PlannedChange::Skip(SkipReason::HasLabel {
                    current: existing.to_string(),
                })
            }
        }
        Action::Clear => {
            let mut list = BranchList::parse(existing);
            if list.remove(label) {
                write(list.join())
            } else {
                PlannedChange::Skip(SkipReason::NoMatchingLabel)
            }
        }
        Action::Delete => PlannedChange::Delete,
    }
}
