//! Run statistics.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::plan::{OperationKind, ReconciliationPlan};

/// Outcome counts of one applied run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub started_at: DateTime<Utc>,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub duration_ms: u64,
}

impl RunStatistics {
    /// Start counting a run.
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            created: 0,
            updated: 0,
            deleted: 0,
            unchanged: 0,
            duration_ms: 0,
        }
    }

    /// Count one successfully applied operation.
    pub fn record(&mut self, kind: OperationKind) {
        match kind {
            OperationKind::Create => self.created += 1,
            OperationKind::Update => self.updated += 1,
            OperationKind::Delete => self.deleted += 1,
        }
    }

    /// Close the run against its plan.
    pub fn finish(&mut self, plan: &ReconciliationPlan, elapsed: Duration) {
        self.unchanged = plan.unchanged().len();
        self.duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    }

    /// Operations applied so far.
    pub fn applied(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

impl std::fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted, {} unchanged in {}ms",
            self.created, self.updated, self.deleted, self.unchanged, self.duration_ms
        )
    }
}
