//! Repository load errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for repository loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while reading policy files from the repository.
///
/// Every variant names the offending path. A load error is fatal: no
/// reconciliation or validation runs on a partially loaded repository.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configured folder does not exist or is not a directory.
    #[error("policies folder not found: {}", path.display())]
    FolderNotFound { path: PathBuf },

    /// The folder could not be listed.
    #[error("failed to list policies folder {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A policy file could not be read.
    #[error("failed to read policy file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A policy file is not a valid policy definition.
    #[error("invalid policy file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A policy file declares an empty `PolicyName`.
    #[error("policy file {} has an empty PolicyName", path.display())]
    EmptyName { path: PathBuf },
}

impl LoadError {
    /// Path of the file or folder the error refers to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::FolderNotFound { path }
            | LoadError::ReadDir { path, .. }
            | LoadError::ReadFile { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::EmptyName { path } => path,
        }
    }
}
