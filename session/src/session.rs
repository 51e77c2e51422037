//! Branch session.
//!
//! Wires the three stages together: membership traversal, plan building and
//! plan execution. The session owns the store it works on, so every
//! operation sees the effects of the previous one.

use kin_core::{BranchId, GraphAccessor, MutationStore, TreeId};
use kin_mutation::MutationExecutor;
use kin_policy::{Action, CurrentLabels, LabelMutationPlan, LabelPolicy, LabelRule};
use kin_registry::{BranchDef, BranchRegistry};
use kin_traversal::{BranchSpec, CancelToken, Membership, MembershipSet, TraversalEngine};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::result::{BranchPreview, BranchReport};

/// What to do to a branch once its members are known.
#[derive(Debug, Clone)]
pub struct LabelRequest {
    /// Action to apply.
    pub action: Action,
    /// Branch label (ignored for `delete`).
    pub label: String,
    /// Caller has acknowledged that `delete` cannot be undone.
    pub confirmed: bool,
    /// Token checked between traversal generations.
    pub cancel: Option<CancelToken>,
}

impl LabelRequest {
    pub fn new(action: Action, label: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
            confirmed: false,
            cancel: None,
        }
    }

    /// A `delete` request. Still needs [`confirm`](Self::confirm) to run.
    pub fn delete() -> Self {
        Self::new(Action::Delete, "")
    }

    /// Acknowledge an irreversible action.
    pub fn confirm(mut self) -> Self {
        self.confirmed = true;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// A branch labeling session over one tree's store.
pub struct BranchSession<S> {
    /// Graph and label storage.
    store: S,
    /// Saved branch definitions.
    registry: BranchRegistry,
    /// Session configuration.
    config: SessionConfig,
    /// Plan builder with the configured label rule.
    policy: LabelPolicy,
}

impl<S> BranchSession<S>
where
    S: GraphAccessor + MutationStore,
{
    /// Create a new session.
    ///
    /// Fails if the configured label pattern does not compile.
    pub fn new(store: S, config: SessionConfig) -> SessionResult<Self> {
        let rule = if config.label_pattern.is_empty() {
            LabelRule::new()
        } else {
            LabelRule::with_pattern(&config.label_pattern)
                .map_err(|e| SessionError::config(e.to_string()))?
        };
        let registry = BranchRegistry::new().with_max_generations(config.max_generations);
        Ok(Self {
            store,
            registry,
            config,
            policy: LabelPolicy::new(rule),
        })
    }

    /// Replace the branch registry.
    pub fn with_registry(mut self, registry: BranchRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the session and return the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Get the branch registry.
    pub fn registry(&self) -> &BranchRegistry {
        &self.registry
    }

    /// Get a mutable reference to the branch registry.
    pub fn registry_mut(&mut self) -> &mut BranchRegistry {
        &mut self.registry
    }

    /// Register a saved branch definition.
    pub fn save_branch(&mut self, def: BranchDef) -> SessionResult<()> {
        debug!(tree = %def.tree, branch = %def.id, "saving branch");
        self.registry.insert(def)?;
        Ok(())
    }

    /// Remove a saved branch definition and return it.
    pub fn forget_branch(&mut self, tree: &TreeId, branch: &BranchId) -> SessionResult<BranchDef> {
        Ok(self.registry.remove(tree, branch)?)
    }

    // ==================== Pipeline ====================

    /// Compute the members of a branch.
    pub fn membership(
        &self,
        spec: &BranchSpec,
        cancel: Option<&CancelToken>,
    ) -> SessionResult<Membership> {
        let mut engine =
            TraversalEngine::new(&self.store).with_max_generations(self.config.max_generations);
        if let Some(token) = cancel {
            engine = engine.with_cancel(token.clone());
        }
        Ok(engine.compute(spec)?)
    }

    /// Compute membership and the plan for `request` without writing anything.
    pub fn preview(
        &self,
        spec: &BranchSpec,
        request: &LabelRequest,
    ) -> SessionResult<BranchPreview> {
        let membership = self.membership(spec, request.cancel.as_ref())?;
        let plan = self.plan(&membership.members, request)?;
        debug!(
            tree = %spec.tree,
            root = %spec.root,
            records = plan.len(),
            targets = plan.targets().count(),
            "branch previewed"
        );
        Ok(BranchPreview { membership, plan })
    }

    /// Compute membership, build the plan and execute it.
    pub fn apply(
        &mut self,
        spec: &BranchSpec,
        request: &LabelRequest,
    ) -> SessionResult<BranchReport> {
        let BranchPreview { membership, plan } = self.preview(spec, request)?;

        let result = MutationExecutor::new(&mut self.store)
            .with_orphan_policy(self.config.orphan_policy)
            .with_verify(self.config.verify_before_write)
            .execute(&plan)?;

        info!(
            tree = %spec.tree,
            root = %spec.root,
            action = %request.action,
            status = ?result.status(),
            "branch applied"
        );
        Ok(BranchReport {
            membership,
            plan,
            result,
        })
    }

    /// Run the full pipeline for a registered branch.
    pub fn apply_branch(
        &mut self,
        tree: &TreeId,
        branch: &BranchId,
        request: &LabelRequest,
    ) -> SessionResult<BranchReport> {
        let spec = self
            .registry
            .get(tree, branch)
            .map(|def| def.to_spec())
            .ok_or_else(|| SessionError::unknown_branch(tree, branch))?;
        debug!(tree = %tree, branch = %branch, "applying registered branch");
        self.apply(&spec, request)
    }

    fn plan(
        &self,
        members: &MembershipSet,
        request: &LabelRequest,
    ) -> SessionResult<LabelMutationPlan> {
        let current = self.current_labels(members)?;
        let plan = self
            .policy
            .build_plan(members, request.action, &request.label, &current)?;
        Ok(if request.confirmed {
            plan.confirm_irreversible()
        } else {
            plan
        })
    }

    fn current_labels(&self, members: &MembershipSet) -> SessionResult<CurrentLabels> {
        let mut current = CurrentLabels::new();
        for record in members.records() {
            let label = self.store.read_label(&record)?;
            if !label.is_empty() {
                current.insert(record, label);
            }
        }
        Ok(current)
    }
}
