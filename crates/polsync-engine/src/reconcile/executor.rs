//! Fail-fast plan application.

use std::time::Instant;

use tracing::{error, info};

use polsync_store::RemotePolicyStore;

use super::plan::{PlannedOperation, ReconciliationPlan};
use super::statistics::RunStatistics;
use crate::error::{ReconciliationError, ReconciliationResult};

/// Apply every operation of `plan` in order.
///
/// Stops at the first failure. Operations applied before it stay applied;
/// the error reports how many there were.
pub async fn apply_plan(
    store: &dyn RemotePolicyStore,
    plan: &ReconciliationPlan,
) -> ReconciliationResult<RunStatistics> {
    let started = Instant::now();
    let mut stats = RunStatistics::start();

    for op in plan.operations() {
        if let Err(source) = apply_operation(store, op).await {
            error!(
                policy = %op.name(),
                operation = %op.kind(),
                applied = stats.applied(),
                error = %source,
                "Operation failed, stopping"
            );
            return Err(ReconciliationError::Apply {
                name: op.name().to_string(),
                kind: op.kind(),
                applied: stats.applied(),
                source,
            });
        }
        stats.record(op.kind());
    }

    stats.finish(plan, started.elapsed());
    Ok(stats)
}

async fn apply_operation(
    store: &dyn RemotePolicyStore,
    op: &PlannedOperation,
) -> polsync_store::StoreResult<()> {
    match op {
        PlannedOperation::Create { name, document } => {
            let arn = store.create_policy(name, document).await?;
            info!(policy = %name, arn = %arn, "Policy created");
        }
        PlannedOperation::Update {
            name,
            arn,
            document,
            ..
        } => {
            let version = store.create_policy_version(arn, document, true).await?;
            info!(policy = %name, arn = %arn, version = %version, "Policy updated");
        }
        PlannedOperation::Delete { name, arn } => {
            store.delete_policy(arn).await?;
            info!(policy = %name, arn = %arn, "Policy deleted");
        }
    }
    Ok(())
}
