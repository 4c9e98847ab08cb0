//! Reconciliation and validation pipelines for IAM policy documents.
//!
//! Both pipelines take desired-state records from
//! [`polsync_core::RepositoryLoader`] and talk to the remote services only
//! through the [`polsync_store`] traits:
//!
//! - [`Reconciler`]: plan and apply create/update/delete operations
//! - [`Validator`]: uniqueness, static analysis, and attachment checks
//!
//! # Example
//!
//! ```rust,ignore
//! use polsync_core::RepositoryLoader;
//! use polsync_engine::{Reconciler, Validator};
//!
//! let records = RepositoryLoader::new("templates/policies").load()?;
//! Validator::new(&advisor, &store).validate(&records).await?;
//! let outcome = Reconciler::new(&store).reconcile(records).await?;
//! println!("{}", outcome.statistics);
//! ```

pub mod error;
pub mod reconcile;
pub mod validate;

pub use error::{ReconciliationError, ReconciliationResult, ValidationError, ValidationResult};
pub use reconcile::{
    OperationKind, PlanSummary, PlannedOperation, ReconciliationOutcome, ReconciliationPlan,
    Reconciler, ReconcilerConfig, RunStatistics, UpdateMode,
};
pub use validate::{Check, ValidationReport, ValidationWarning, Validator, ValidatorConfig};
