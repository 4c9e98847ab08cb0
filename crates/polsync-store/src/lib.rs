//! Remote collaborators for polsync.
//!
//! This crate defines the two remote services the engine talks to:
//!
//! - [`RemotePolicyStore`]: list/get/create/version/delete managed policies
//! - [`PolicyAdvisor`]: static analysis of policy documents
//!
//! Both return paginated results. [`Paginator`] turns a page-fetching source
//! into a forward-only lazy sequence that can be drained in full.
//!
//! With the `aws` feature (default), [`aws`] provides implementations backed
//! by IAM and IAM Access Analyzer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use polsync_store::{ListPolicies, Paginator, PolicyScope, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let clients = polsync_store::aws::AwsClients::connect(&config).await;
//! let store = clients.policy_store();
//!
//! let policies = Paginator::new(ListPolicies::new(&store, PolicyScope::Local, false))
//!     .drain()
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod page;
pub mod traits;
pub mod types;

#[cfg(feature = "aws")]
pub mod aws;

pub use config::{ConfigError, RetryMode, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use page::{AnalyzePolicy, ListPolicies, Page, PageSource, Paginator};
pub use traits::{PolicyAdvisor, RemotePolicyStore};
pub use types::{AnalysisRequest, Finding, FindingSeverity, PolicyScope, PolicyType, RemotePolicy};
