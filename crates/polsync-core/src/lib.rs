//! polsync Core Library
//!
//! Shared data model for keeping IAM customer-managed policies in sync with
//! a repository of policy documents.
//!
//! # Modules
//!
//! - [`ids`] - Typed remote handles (PolicyArn, VersionId)
//! - [`record`] - PolicyRecord and PolicyDocument
//! - [`set`] - Name-keyed, insertion-ordered PolicySet
//! - [`loader`] - Repository loader for policy files
//! - [`error`] - Load errors
//!
//! # Example
//!
//! ```
//! use polsync_core::{PolicyDocument, PolicyRecord, PolicySet};
//! use serde_json::json;
//!
//! let record = PolicyRecord::desired(
//!     "ReadOnlyBuckets",
//!     PolicyDocument::new(json!({"Version": "2012-10-17", "Statement": []})),
//! );
//! let set = PolicySet::from_records(vec![record]).unwrap();
//! assert!(set.contains("ReadOnlyBuckets"));
//! ```

pub mod error;
pub mod ids;
pub mod loader;
pub mod record;
pub mod set;

pub use error::{LoadError, LoadResult};
pub use ids::{PolicyArn, VersionId};
pub use loader::RepositoryLoader;
pub use record::{PolicyDocument, PolicyRecord};
pub use set::{duplicate_names, DuplicateNames, PolicySet};
