//! Remote service traits.

use async_trait::async_trait;

use polsync_core::{PolicyArn, PolicyDocument, VersionId};

use crate::error::StoreResult;
use crate::page::Page;
use crate::types::{AnalysisRequest, Finding, PolicyScope, RemotePolicy};

/// The identity service's managed-policy API.
///
/// Every method is a single remote call. Listing is exposed one page at a
/// time; use [`crate::ListPolicies`] with [`crate::Paginator`] to walk it.
#[async_trait]
pub trait RemotePolicyStore: Send + Sync {
    /// Fetch one page of managed policies.
    ///
    /// `marker` is the continuation marker from the previous page, `None`
    /// for the first page. The returned page's `next_token` is `None` on the
    /// final page.
    async fn list_policies_page(
        &self,
        scope: PolicyScope,
        only_attached: bool,
        marker: Option<String>,
    ) -> StoreResult<Page<RemotePolicy>>;

    /// Look up a policy by its remote identifier.
    ///
    /// Returns [`crate::StoreError::NotFound`] when it does not exist.
    async fn get_policy(&self, arn: &PolicyArn) -> StoreResult<RemotePolicy>;

    /// Fetch the document of the policy's default version.
    async fn get_active_document(&self, policy: &RemotePolicy) -> StoreResult<PolicyDocument>;

    /// Create a policy, returning its remote identifier.
    async fn create_policy(&self, name: &str, document: &PolicyDocument)
        -> StoreResult<PolicyArn>;

    /// Publish a new version of an existing policy.
    async fn create_policy_version(
        &self,
        arn: &PolicyArn,
        document: &PolicyDocument,
        set_as_default: bool,
    ) -> StoreResult<VersionId>;

    /// Delete a policy.
    async fn delete_policy(&self, arn: &PolicyArn) -> StoreResult<()>;
}

/// Static analysis of policy documents.
#[async_trait]
pub trait PolicyAdvisor: Send + Sync {
    /// Fetch one page of findings for a document.
    async fn validate_policy_page(
        &self,
        request: &AnalysisRequest,
        next_token: Option<String>,
    ) -> StoreResult<Page<Finding>>;
}
