//! Engine error types.

use thiserror::Error;

use polsync_core::{DuplicateNames, PolicyArn};
use polsync_store::StoreError;

use crate::reconcile::OperationKind;
use crate::validate::Check;

/// Result type for reconciliation.
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A reconciliation run that could not complete.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("duplicate policy names in repository: {}", .names.join(", "))]
    DuplicateName { names: Vec<String> },

    #[error("failed to list current policies: {source}")]
    Listing {
        #[source]
        source: StoreError,
    },

    #[error("failed to read active document of {name}: {source}")]
    ActiveDocument {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to {kind} {name} after {applied} applied operation(s): {source}")]
    Apply {
        name: String,
        kind: OperationKind,
        applied: usize,
        #[source]
        source: StoreError,
    },
}

impl ReconciliationError {
    /// Policy the failure is about, when there is a single one.
    pub fn policy_name(&self) -> Option<&str> {
        match self {
            ReconciliationError::ActiveDocument { name, .. }
            | ReconciliationError::Apply { name, .. } => Some(name),
            ReconciliationError::DuplicateName { .. } | ReconciliationError::Listing { .. } => {
                None
            }
        }
    }
}

impl From<DuplicateNames> for ReconciliationError {
    fn from(err: DuplicateNames) -> Self {
        ReconciliationError::DuplicateName { names: err.names }
    }
}

/// The first failed check of a validation run.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("duplicate policy names: {}", .names.join(", "))]
    DuplicateNames { names: Vec<String> },

    #[error("{name}: {issue_code}: {detail}")]
    Finding {
        name: String,
        issue_code: String,
        detail: String,
    },

    #[error("{name}: policy analysis failed: {source}")]
    Advisor {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("{name}: document could not be serialized: {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name}: attached policy {identifier} could not be resolved: {source}")]
    Attachment {
        name: String,
        identifier: PolicyArn,
        #[source]
        source: StoreError,
    },
}

impl ValidationError {
    /// Check that produced this failure.
    pub fn check(&self) -> Check {
        match self {
            ValidationError::DuplicateNames { .. } => Check::Uniqueness,
            ValidationError::Finding { .. }
            | ValidationError::Advisor { .. }
            | ValidationError::Serialization { .. } => Check::StaticAnalysis,
            ValidationError::Attachment { .. } => Check::Attachments,
        }
    }

    /// Offending record, absent for uniqueness failures.
    pub fn policy_name(&self) -> Option<&str> {
        match self {
            ValidationError::DuplicateNames { .. } => None,
            ValidationError::Finding { name, .. }
            | ValidationError::Advisor { name, .. }
            | ValidationError::Serialization { name, .. }
            | ValidationError::Attachment { name, .. } => Some(name),
        }
    }
}
