//! IAM Access Analyzer policy advisor.

use async_trait::async_trait;
use aws_sdk_accessanalyzer::types::{
    Locale, PolicyType as SdkPolicyType, ValidatePolicyFinding, ValidatePolicyFindingType,
};
use aws_sdk_accessanalyzer::Client;
use tracing::debug;

use super::map_sdk_error;
use crate::error::StoreResult;
use crate::page::Page;
use crate::traits::PolicyAdvisor;
use crate::types::{AnalysisRequest, Finding, FindingSeverity, PolicyType};

/// [`PolicyAdvisor`] backed by Access Analyzer's `ValidatePolicy`.
#[derive(Debug, Clone)]
pub struct AccessAnalyzerAdvisor {
    client: Client,
}

impl AccessAnalyzerAdvisor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn sdk_policy_type(policy_type: PolicyType) -> SdkPolicyType {
    match policy_type {
        PolicyType::IdentityPolicy => SdkPolicyType::IdentityPolicy,
        PolicyType::ResourcePolicy => SdkPolicyType::ResourcePolicy,
        PolicyType::ServiceControlPolicy => SdkPolicyType::ServiceControlPolicy,
    }
}

fn severity(finding_type: &ValidatePolicyFindingType) -> FindingSeverity {
    match finding_type {
        ValidatePolicyFindingType::Error => FindingSeverity::Error,
        ValidatePolicyFindingType::SecurityWarning => FindingSeverity::SecurityWarning,
        ValidatePolicyFindingType::Warning => FindingSeverity::Warning,
        ValidatePolicyFindingType::Suggestion => FindingSeverity::Suggestion,
        _ => FindingSeverity::Other,
    }
}

fn finding(raw: &ValidatePolicyFinding) -> Finding {
    let link = raw.learn_more_link();
    Finding {
        severity: severity(raw.finding_type()),
        issue_code: raw.issue_code().to_string(),
        detail: raw.finding_details().to_string(),
        learn_more_link: (!link.is_empty()).then(|| link.to_string()),
    }
}

#[async_trait]
impl PolicyAdvisor for AccessAnalyzerAdvisor {
    async fn validate_policy_page(
        &self,
        request: &AnalysisRequest,
        next_token: Option<String>,
    ) -> StoreResult<Page<Finding>> {
        let output = self
            .client
            .validate_policy()
            .locale(Locale::from(request.locale.as_str()))
            .policy_document(&request.document)
            .policy_type(sdk_policy_type(request.policy_type))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| map_sdk_error("ValidatePolicy", "policy document", e))?;

        let items: Vec<Finding> = output.findings().iter().map(finding).collect();
        debug!(count = items.len(), "Received advisor findings");

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
