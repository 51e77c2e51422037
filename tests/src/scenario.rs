//! Scenario definition and runner.

use kin_core::{BranchId, TreeId};
use kin_graph::Genealogy;
use kin_registry::BranchDef;
use kin_session::{BranchSession, LabelRequest, SessionConfig};
use kin_traversal::BranchSpec;

use crate::assertion::{Assertion, AssertionBuilder, StepOutcome};
use crate::error::{ScenarioError, ScenarioResult};
use crate::fixture::TreeFixture;

/// What a step asks the session to do.
#[derive(Debug, Clone)]
pub enum StepKind {
    /// Run the full pipeline.
    Apply {
        spec: BranchSpec,
        request: LabelRequest,
    },
    /// Compute membership and plan only.
    Preview {
        spec: BranchSpec,
        request: LabelRequest,
    },
    /// Run the full pipeline for a registered branch.
    ApplyBranch {
        tree: TreeId,
        branch: BranchId,
        request: LabelRequest,
    },
}

/// A single step in a scenario.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub kind: StepKind,
    pub assertion: Assertion,
}

/// A named sequence of steps against one tree.
///
/// Steps run in order on the same session, so each step sees the labels
/// written by the ones before it.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    fixture: TreeFixture,
    config: SessionConfig,
    branches: Vec<BranchDef>,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, fixture: TreeFixture) -> Self {
        Self {
            name: name.into(),
            fixture,
            config: SessionConfig::default(),
            branches: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Use a non-default session configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a branch definition before the first step.
    pub fn branch(mut self, def: BranchDef) -> Self {
        self.branches.push(def);
        self
    }

    pub fn apply<F>(self, name: &str, spec: BranchSpec, request: LabelRequest, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.step(name, StepKind::Apply { spec, request }, f)
    }

    pub fn preview<F>(self, name: &str, spec: BranchSpec, request: LabelRequest, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.step(name, StepKind::Preview { spec, request }, f)
    }

    pub fn apply_branch<F>(
        self,
        name: &str,
        tree: &str,
        branch: &str,
        request: LabelRequest,
        f: F,
    ) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let kind = StepKind::ApplyBranch {
            tree: tree.into(),
            branch: branch.into(),
            request,
        };
        self.step(name, kind, f)
    }

    fn step<F>(mut self, name: &str, kind: StepKind, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.to_string(),
            kind,
            assertion: f(AssertionBuilder::new()).build(),
        });
        self
    }

    /// Run every step and verify its assertion. Returns the final tree.
    pub fn run(self) -> ScenarioResult<Genealogy> {
        let tree = self.fixture.build()?;
        let mut session = BranchSession::new(tree, self.config)
            .map_err(|e| ScenarioError::fixture(e.to_string()))?;
        for def in self.branches {
            session
                .save_branch(def)
                .map_err(|e| ScenarioError::fixture(e.to_string()))?;
        }

        for step in &self.steps {
            let result = match &step.kind {
                StepKind::Apply { spec, request } => {
                    session.apply(spec, request).map(StepOutcome::Applied)
                }
                StepKind::Preview { spec, request } => {
                    session.preview(spec, request).map(StepOutcome::Previewed)
                }
                StepKind::ApplyBranch {
                    tree,
                    branch,
                    request,
                } => session
                    .apply_branch(tree, branch, request)
                    .map(StepOutcome::Applied),
            };
            let result = result.map_err(|e| e.to_string());
            step.assertion.verify(&step.name, &result, session.store())?;
        }

        Ok(session.into_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::nuclear_family;
    use kin_policy::{Action, OverwriteMode};

    #[test]
    fn test_steps_are_collected_in_order() {
        let scenario = Scenario::new("collect", nuclear_family())
            .preview(
                "look",
                BranchSpec::new("T1", "P1"),
                LabelRequest::new(Action::Clear, "B1"),
                |a| a.targets(0),
            )
            .apply(
                "label",
                BranchSpec::new("T1", "P1"),
                LabelRequest::new(Action::Add(OverwriteMode::Leave), "B1"),
                |a| a.updated(1),
            );

        assert_eq!(scenario.name(), "collect");
        assert_eq!(
            scenario
                .steps()
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>(),
            vec!["look", "label"]
        );
    }

    #[test]
    fn test_failed_assertion_names_the_step() {
        let result = Scenario::new("wrong", nuclear_family())
            .apply(
                "label",
                BranchSpec::new("T1", "P1"),
                LabelRequest::new(Action::Add(OverwriteMode::Leave), "B1"),
                |a| a.updated(5),
            )
            .run();

        match result {
            Err(ScenarioError::AssertionFailed { step, message }) => {
                assert_eq!(step, "label");
                assert!(message.contains("expected 5 updated, got 1"));
            }
            other => panic!("expected assertion failure, got {other:?}"),
        }
    }
}
