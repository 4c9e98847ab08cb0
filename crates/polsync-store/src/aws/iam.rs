//! IAM managed-policy store.

use async_trait::async_trait;
use aws_sdk_iam::types::{Policy, PolicyScopeType, PolicyVersion};
use aws_sdk_iam::Client;
use tracing::{debug, info};

use polsync_core::{PolicyArn, PolicyDocument, VersionId};

use super::map_sdk_error;
use crate::error::{StoreError, StoreResult};
use crate::page::Page;
use crate::traits::RemotePolicyStore;
use crate::types::{PolicyScope, RemotePolicy};

/// IAM keeps at most this many versions per managed policy.
pub const MAX_POLICY_VERSIONS: usize = 5;

/// [`RemotePolicyStore`] backed by the IAM API.
#[derive(Debug, Clone)]
pub struct IamPolicyStore {
    client: Client,
}

impl IamPolicyStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn list_versions(&self, arn: &PolicyArn) -> StoreResult<Vec<PolicyVersion>> {
        let output = self
            .client
            .list_policy_versions()
            .policy_arn(arn.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error("ListPolicyVersions", arn.as_str(), e))?;
        Ok(output.versions().to_vec())
    }

    async fn delete_version(&self, arn: &PolicyArn, version: &VersionId) -> StoreResult<()> {
        self.client
            .delete_policy_version()
            .policy_arn(arn.as_str())
            .version_id(version.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error("DeletePolicyVersion", arn.as_str(), e))?;
        Ok(())
    }

    /// Delete the oldest non-default version when the policy is at the
    /// version limit, so that a new version can be published.
    async fn make_room_for_version(&self, arn: &PolicyArn) -> StoreResult<()> {
        let versions = self.list_versions(arn).await?;
        if versions.len() < MAX_POLICY_VERSIONS {
            return Ok(());
        }

        let Some(oldest) = oldest_non_default(&versions) else {
            return Err(StoreError::LimitExceeded {
                operation: "CreatePolicyVersion".to_string(),
                message: format!("{arn} has no non-default version to remove"),
            });
        };

        info!(policy_arn = %arn, version_id = %oldest, "Removing oldest policy version");
        self.delete_version(arn, &oldest).await
    }

    /// IAM refuses `DeletePolicy` while non-default versions remain.
    async fn delete_non_default_versions(&self, arn: &PolicyArn) -> StoreResult<()> {
        let versions = self.list_versions(arn).await?;
        for version in non_default_versions(&versions) {
            debug!(policy_arn = %arn, version_id = %version, "Removing policy version");
            self.delete_version(arn, &version).await?;
        }
        Ok(())
    }
}

fn scope_type(scope: PolicyScope) -> PolicyScopeType {
    match scope {
        PolicyScope::Local => PolicyScopeType::Local,
        PolicyScope::Aws => PolicyScopeType::Aws,
        PolicyScope::All => PolicyScopeType::All,
    }
}

fn remote_policy(operation: &str, policy: &Policy) -> StoreResult<RemotePolicy> {
    let name = policy
        .policy_name()
        .ok_or_else(|| StoreError::invalid_response(operation, "policy without a name"))?;
    let arn = policy
        .arn()
        .ok_or_else(|| StoreError::invalid_response(operation, "policy without an ARN"))?;

    Ok(RemotePolicy {
        name: name.to_string(),
        arn: PolicyArn::new(arn),
        default_version_id: policy.default_version_id().map(VersionId::new),
        attachment_count: policy.attachment_count(),
    })
}

fn non_default_versions(versions: &[PolicyVersion]) -> Vec<VersionId> {
    versions
        .iter()
        .filter(|v| !v.is_default_version())
        .filter_map(PolicyVersion::version_id)
        .map(VersionId::new)
        .collect()
}

fn oldest_non_default(versions: &[PolicyVersion]) -> Option<VersionId> {
    versions
        .iter()
        .filter(|v| !v.is_default_version())
        .filter_map(|v| {
            let created = v.create_date().map(|d| (d.secs(), d.subsec_nanos()));
            v.version_id().map(|id| (created, id))
        })
        .min_by_key(|(created, _)| *created)
        .map(|(_, id)| VersionId::new(id))
}

/// IAM returns documents URL-encoded.
fn decode_document(operation: &str, raw: &str) -> StoreResult<PolicyDocument> {
    let decoded = urlencoding::decode(raw)
        .map_err(|e| StoreError::invalid_response(operation, e.to_string()))?;
    Ok(PolicyDocument::from_json_str(&decoded)?)
}

#[async_trait]
impl RemotePolicyStore for IamPolicyStore {
    async fn list_policies_page(
        &self,
        scope: PolicyScope,
        only_attached: bool,
        marker: Option<String>,
    ) -> StoreResult<Page<RemotePolicy>> {
        let output = self
            .client
            .list_policies()
            .scope(scope_type(scope))
            .only_attached(only_attached)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| map_sdk_error("ListPolicies", "policies", e))?;

        let items = output
            .policies()
            .iter()
            .map(|p| remote_policy("ListPolicies", p))
            .collect::<StoreResult<Vec<_>>>()?;

        debug!(
            count = items.len(),
            has_more = output.marker().is_some(),
            "Listed policy page"
        );

        Ok(Page {
            items,
            next_token: output.marker().map(str::to_string),
        })
    }

    async fn get_policy(&self, arn: &PolicyArn) -> StoreResult<RemotePolicy> {
        let output = self
            .client
            .get_policy()
            .policy_arn(arn.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error("GetPolicy", arn.as_str(), e))?;

        let policy = output
            .policy()
            .ok_or_else(|| StoreError::not_found(arn.as_str()))?;
        remote_policy("GetPolicy", policy)
    }

    async fn get_active_document(&self, policy: &RemotePolicy) -> StoreResult<PolicyDocument> {
        let version = match &policy.default_version_id {
            Some(version) => version.clone(),
            None => self
                .get_policy(&policy.arn)
                .await?
                .default_version_id
                .ok_or_else(|| {
                    StoreError::invalid_response("GetPolicy", "policy without a default version")
                })?,
        };

        let output = self
            .client
            .get_policy_version()
            .policy_arn(policy.arn.as_str())
            .version_id(version.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error("GetPolicyVersion", policy.arn.as_str(), e))?;

        let raw = output
            .policy_version()
            .and_then(PolicyVersion::document)
            .ok_or_else(|| {
                StoreError::invalid_response("GetPolicyVersion", "version without a document")
            })?;

        decode_document("GetPolicyVersion", raw)
    }

    async fn create_policy(
        &self,
        name: &str,
        document: &PolicyDocument,
    ) -> StoreResult<PolicyArn> {
        let output = self
            .client
            .create_policy()
            .policy_name(name)
            .policy_document(document.to_json_string()?)
            .send()
            .await
            .map_err(|e| map_sdk_error("CreatePolicy", name, e))?;

        let arn = output
            .policy()
            .and_then(Policy::arn)
            .ok_or_else(|| StoreError::invalid_response("CreatePolicy", "no ARN returned"))?;

        debug!(policy_name = %name, policy_arn = %arn, "Created policy");
        Ok(PolicyArn::new(arn))
    }

    async fn create_policy_version(
        &self,
        arn: &PolicyArn,
        document: &PolicyDocument,
        set_as_default: bool,
    ) -> StoreResult<VersionId> {
        self.make_room_for_version(arn).await?;

        let output = self
            .client
            .create_policy_version()
            .policy_arn(arn.as_str())
            .policy_document(document.to_json_string()?)
            .set_as_default(set_as_default)
            .send()
            .await
            .map_err(|e| map_sdk_error("CreatePolicyVersion", arn.as_str(), e))?;

        let version = output
            .policy_version()
            .and_then(PolicyVersion::version_id)
            .ok_or_else(|| {
                StoreError::invalid_response("CreatePolicyVersion", "no version id returned")
            })?;

        debug!(policy_arn = %arn, version_id = %version, "Created policy version");
        Ok(VersionId::new(version))
    }

    async fn delete_policy(&self, arn: &PolicyArn) -> StoreResult<()> {
        self.delete_non_default_versions(arn).await?;

        self.client
            .delete_policy()
            .policy_arn(arn.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error("DeletePolicy", arn.as_str(), e))?;

        debug!(policy_arn = %arn, "Deleted policy");
        Ok(())
    }
}
