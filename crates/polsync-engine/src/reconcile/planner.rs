//! Three-way classification of desired against current state.

use serde::Serialize;
use tracing::debug;

use polsync_core::PolicySet;

use super::plan::{PlannedOperation, ReconciliationPlan};
use super::state::CurrentState;

/// How policies present on both sides are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Update only when the active document differs.
    #[default]
    ContentAware,
    /// Publish a new version for every policy present on both sides.
    Always,
}

impl UpdateMode {
    /// Whether active documents must be fetched before planning.
    pub fn needs_documents(&self) -> bool {
        matches!(self, UpdateMode::ContentAware)
    }
}

/// Compute the plan for one run.
///
/// Every desired name absent remotely becomes a creation. Every remote name
/// absent from `desired` becomes a deletion. Names on both sides become an
/// update unless the mode is content-aware and the active document is
/// structurally equal to the desired one. A matched name whose active
/// document was not fetched is updated.
pub fn compute_plan(
    desired: &PolicySet,
    current: &CurrentState,
    mode: UpdateMode,
) -> ReconciliationPlan {
    let mut upserts = Vec::new();
    let mut unchanged = Vec::new();

    for record in desired {
        let Some(remote) = current.get(&record.name) else {
            upserts.push(PlannedOperation::Create {
                name: record.name.clone(),
                document: record.document.clone(),
            });
            continue;
        };

        let active = match mode {
            UpdateMode::ContentAware => current.document(&record.name),
            UpdateMode::Always => None,
        };

        match active {
            Some(active) if *active == record.document => {
                debug!(policy = %record.name, "Active document matches");
                unchanged.push(record.name.clone());
            }
            active => upserts.push(PlannedOperation::Update {
                name: record.name.clone(),
                arn: remote.arn.clone(),
                document: record.document.clone(),
                changed_keys: active
                    .map(|active| record.document.changed_keys(active))
                    .unwrap_or_default(),
            }),
        }
    }

    let deletions = current
        .policies()
        .iter()
        .filter(|remote| !desired.contains(&remote.name))
        .map(|remote| PlannedOperation::Delete {
            name: remote.name.clone(),
            arn: remote.arn.clone(),
        })
        .collect();

    ReconciliationPlan::new(upserts, deletions, unchanged)
}
