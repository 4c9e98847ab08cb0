//! Reconciler facade.

use serde::Serialize;
use tracing::info;

use polsync_core::{PolicyRecord, PolicySet};
use polsync_store::RemotePolicyStore;

use super::executor::apply_plan;
use super::plan::ReconciliationPlan;
use super::planner::{compute_plan, UpdateMode};
use super::state::CurrentState;
use super::statistics::RunStatistics;
use crate::error::ReconciliationResult;

/// Reconciler configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcilerConfig {
    pub update_mode: UpdateMode,
}

/// Plan and statistics of an applied run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationOutcome {
    pub plan: ReconciliationPlan,
    pub statistics: RunStatistics,
}

/// Brings the remote local-policy scope in line with a desired set.
pub struct Reconciler<'a> {
    store: &'a dyn RemotePolicyStore,
    config: ReconcilerConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(store: &'a dyn RemotePolicyStore) -> Self {
        Self::with_config(store, ReconcilerConfig::default())
    }

    pub fn with_config(store: &'a dyn RemotePolicyStore, config: ReconcilerConfig) -> Self {
        Self { store, config }
    }

    /// Drain the listing and, when comparing content, fetch the active
    /// documents of matched policies.
    pub async fn load_current(&self, desired: &PolicySet) -> ReconciliationResult<CurrentState> {
        let mut current = CurrentState::load(self.store).await?;
        if self.config.update_mode.needs_documents() {
            current.fetch_documents(self.store, desired).await?;
        }
        Ok(current)
    }

    /// Compute the plan without touching remote state.
    pub async fn plan(&self, desired: &PolicySet) -> ReconciliationResult<ReconciliationPlan> {
        let current = self.load_current(desired).await?;
        let plan = compute_plan(desired, &current, self.config.update_mode);
        info!(
            desired = desired.len(),
            current = current.len(),
            summary = %plan.summary(),
            "Computed reconciliation plan"
        );
        Ok(plan)
    }

    /// Apply a previously computed plan, stopping at the first failure.
    pub async fn apply(&self, plan: &ReconciliationPlan) -> ReconciliationResult<RunStatistics> {
        let stats = apply_plan(self.store, plan).await?;
        info!(statistics = %stats, "Reconciliation applied");
        Ok(stats)
    }

    /// Build the desired set, plan and apply.
    ///
    /// Duplicate names among `records` fail before any remote call.
    pub async fn reconcile(
        &self,
        records: Vec<PolicyRecord>,
    ) -> ReconciliationResult<ReconciliationOutcome> {
        let desired = PolicySet::from_records(records)?;
        let plan = self.plan(&desired).await?;
        let statistics = self.apply(&plan).await?;
        Ok(ReconciliationOutcome { plan, statistics })
    }
}
