//! Types exchanged with the remote services.

use serde::{Deserialize, Serialize};

use polsync_core::{PolicyArn, VersionId};

/// Which managed policies a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyScope {
    /// Customer-managed policies in the account.
    #[default]
    Local,
    /// Provider-managed policies.
    Aws,
    /// Both.
    All,
}

impl std::fmt::Display for PolicyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyScope::Local => write!(f, "Local"),
            PolicyScope::Aws => write!(f, "AWS"),
            PolicyScope::All => write!(f, "All"),
        }
    }
}

/// A managed policy as returned by the remote listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePolicy {
    /// Policy name, the natural key.
    pub name: String,
    /// Remote handle.
    pub arn: PolicyArn,
    /// Version currently marked as default, when the service reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_version_id: Option<VersionId>,
    /// Number of principals the policy is attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_count: Option<i32>,
}

impl RemotePolicy {
    /// Create a listing entry.
    pub fn new(name: impl Into<String>, arn: impl Into<PolicyArn>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
            default_version_id: None,
            attachment_count: None,
        }
    }

    /// Set the default version id.
    #[must_use]
    pub fn with_default_version(mut self, version: impl Into<VersionId>) -> Self {
        self.default_version_id = Some(version.into());
        self
    }
}

/// Kind of policy submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyType {
    /// Identity-based policy attached to users, groups or roles.
    #[default]
    IdentityPolicy,
    /// Resource-based policy.
    ResourcePolicy,
    /// Organization service control policy.
    ServiceControlPolicy,
}

impl std::fmt::Display for PolicyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyType::IdentityPolicy => write!(f, "IDENTITY_POLICY"),
            PolicyType::ResourcePolicy => write!(f, "RESOURCE_POLICY"),
            PolicyType::ServiceControlPolicy => write!(f, "SERVICE_CONTROL_POLICY"),
        }
    }
}

/// A document submitted to the policy advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Serialized policy document.
    pub document: String,
    /// Language for finding details (e.g. `EN`).
    pub locale: String,
    pub policy_type: PolicyType,
}

impl AnalysisRequest {
    /// Build an identity-policy request in the given locale.
    pub fn identity(document: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            locale: locale.into(),
            policy_type: PolicyType::IdentityPolicy,
        }
    }
}

/// Severity of a static-analysis finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingSeverity {
    /// The policy is invalid or will not work as written.
    Error,
    /// The policy grants access that is considered risky.
    SecurityWarning,
    /// The policy does not follow best practice.
    Warning,
    /// Optional improvement.
    Suggestion,
    /// Severity not known to this version.
    Other,
}

impl FindingSeverity {
    /// Findings that must stop a validation run.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, FindingSeverity::Error)
    }

    /// Findings that are reported without stopping the run.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            FindingSeverity::Warning | FindingSeverity::SecurityWarning
        )
    }
}

impl std::fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingSeverity::Error => write!(f, "ERROR"),
            FindingSeverity::SecurityWarning => write!(f, "SECURITY_WARNING"),
            FindingSeverity::Warning => write!(f, "WARNING"),
            FindingSeverity::Suggestion => write!(f, "SUGGESTION"),
            FindingSeverity::Other => write!(f, "OTHER"),
        }
    }
}

/// One static-analysis result for a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: FindingSeverity,
    /// Short machine-readable code (e.g. `MISSING_VERSION`).
    pub issue_code: String,
    /// Human-readable description.
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learn_more_link: Option<String>,
}

impl Finding {
    /// Create a finding.
    pub fn new(
        severity: FindingSeverity,
        issue_code: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            issue_code: issue_code.into(),
            detail: detail.into(),
            learn_more_link: None,
        }
    }
}
