//! Desired-state reconciliation.
//!
//! [`Reconciler::plan`] drains the remote listing, classifies every name as
//! create, update, delete or unchanged, and returns a
//! [`ReconciliationPlan`]. [`Reconciler::apply`] executes it fail-fast.

mod engine;
mod executor;
mod plan;
mod planner;
mod state;
mod statistics;

pub use engine::{ReconciliationOutcome, Reconciler, ReconcilerConfig};
pub use executor::apply_plan;
pub use plan::{OperationKind, PlanSummary, PlannedOperation, ReconciliationPlan};
pub use planner::{compute_plan, UpdateMode};
pub use state::CurrentState;
pub use statistics::RunStatistics;
