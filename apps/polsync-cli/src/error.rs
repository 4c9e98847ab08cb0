//! CLI error types and exit codes

use thiserror::Error;

use polsync_core::LoadError;
use polsync_engine::{ReconciliationError, ValidationError};
use polsync_store::ConfigError;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: Load, configuration, remote or reconciliation failure
/// - 4: Validation failure
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to load policies: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconciliationError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) => 4,
            CliError::Load(_)
            | CliError::Config(_)
            | CliError::Reconcile(_)
            | CliError::Output(_) => 1,
        }
    }

    /// Print the error to stderr with formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Load(LoadError::FolderNotFound { .. }) => {
                Some("Pass --policies-folder with the path to the policy templates.")
            }
            CliError::Load(LoadError::Parse { .. } | LoadError::EmptyName { .. }) => {
                Some("Each file must be JSON with PolicyName and PolicyDocument.")
            }
            CliError::Reconcile(ReconciliationError::Apply { .. }) => Some(
                "Operations before the failure were applied. Fix the cause and run deploy again.",
            ),
            CliError::Reconcile(ReconciliationError::DuplicateName { .. })
            | CliError::Validation(ValidationError::DuplicateNames { .. }) => {
                Some("Rename or remove one of the files declaring the same PolicyName.")
            }
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validation_failures_exit_4() {
        let err = CliError::from(ValidationError::DuplicateNames {
            names: vec!["a".into()],
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_other_failures_exit_1() {
        let load = CliError::from(LoadError::FolderNotFound {
            path: PathBuf::from("missing"),
        });
        assert_eq!(load.exit_code(), 1);
        assert!(load.suggestion().is_some());

        let reconcile = CliError::from(ReconciliationError::DuplicateName {
            names: vec!["a".into()],
        });
        assert_eq!(reconcile.exit_code(), 1);
        assert_eq!(CliError::Config("bad".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = CliError::Config("POLSYNC_MAX_ATTEMPTS: must be positive".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: POLSYNC_MAX_ATTEMPTS: must be positive"
        );
    }
}
