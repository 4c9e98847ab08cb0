//! Repository loader
//!
//! Reads every file in the policies folder and parses it as a policy
//! definition:
//!
//! ```json
//! {
//!   "PolicyName": "DeployPipeline",
//!   "PolicyDocument": { "Version": "2012-10-17", "Statement": [] },
//!   "AttachedPolicies": ["arn:aws:iam::aws:policy/ReadOnlyAccess"]
//! }
//! ```
//!
//! Files are visited in file-name order so the resulting record order is
//! stable between runs. Duplicate names are kept; detecting them is the
//! caller's job.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LoadError, LoadResult};
use crate::ids::PolicyArn;
use crate::record::{PolicyDocument, PolicyRecord};

/// On-disk shape of a policy file. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyFile {
    policy_name: String,
    policy_document: PolicyDocument,
    #[serde(default)]
    attached_policies: Vec<String>,
}

/// Loads desired-state policy records from a folder.
#[derive(Debug, Clone)]
pub struct RepositoryLoader {
    folder: PathBuf,
}

impl RepositoryLoader {
    /// Create a loader for the given folder.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Folder this loader reads from.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Load every policy file in the folder.
    ///
    /// Stops at the first unreadable or malformed file.
    pub fn load(&self) -> LoadResult<Vec<PolicyRecord>> {
        if !self.folder.is_dir() {
            return Err(LoadError::FolderNotFound {
                path: self.folder.clone(),
            });
        }

        let files = self.policy_files()?;
        let mut records = Vec::with_capacity(files.len());

        for path in files {
            let record = Self::load_file(&path)?;
            tracing::debug!(
                policy = %record.name,
                file = %path.display(),
                attachments = record.attachments.len(),
                "Loaded policy file"
            );
            records.push(record);
        }

        tracing::info!(
            folder = %self.folder.display(),
            count = records.len(),
            "Customer-managed policies loaded from repository files"
        );

        Ok(records)
    }

    /// Parse a single policy file.
    pub fn load_file(path: &Path) -> LoadResult<PolicyRecord> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let file: PolicyFile =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if file.policy_name.trim().is_empty() {
            return Err(LoadError::EmptyName {
                path: path.to_path_buf(),
            });
        }

        let attachments = file
            .attached_policies
            .into_iter()
            .map(PolicyArn::from)
            .collect();

        Ok(PolicyRecord::desired(file.policy_name, file.policy_document)
            .with_attachments(attachments)
            .with_source(path))
    }

    /// Regular files in the folder, sorted by file name.
    fn policy_files(&self) -> LoadResult<Vec<PathBuf>> {
        let read_dir_error = |source| LoadError::ReadDir {
            path: self.folder.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.folder).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if path.is_file() {
                files.push(path);
            } else {
                tracing::debug!(entry = %path.display(), "Skipping non-file entry");
            }
        }

        files.sort();
        Ok(files)
    }
}
