//! Validation results.

use serde::Serialize;

use polsync_store::{Finding, FindingSeverity};

/// A non-fatal advisor finding attached to the record it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub policy_name: String,
    pub severity: FindingSeverity,
    pub issue_code: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learn_more_link: Option<String>,
}

impl ValidationWarning {
    pub fn from_finding(policy_name: &str, finding: &Finding) -> Self {
        Self {
            policy_name: policy_name.to_string(),
            severity: finding.severity,
            issue_code: finding.issue_code.clone(),
            detail: finding.detail.clone(),
            learn_more_link: finding.learn_more_link.clone(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.policy_name, self.severity, self.issue_code, self.detail
        )
    }
}

/// Summary of a passed validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub records_checked: usize,
    /// Findings analysed across all documents, of any severity.
    pub findings_seen: usize,
    pub warnings: Vec<ValidationWarning>,
    pub attachments_resolved: usize,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings raised for one record.
    pub fn warnings_for<'a>(
        &'a self,
        policy_name: &'a str,
    ) -> impl Iterator<Item = &'a ValidationWarning> + 'a {
        self.warnings
            .iter()
            .filter(move |w| w.policy_name == policy_name)
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} policies checked, {} warning(s), {} attachment(s) resolved",
            self.records_checked,
            self.warnings.len(),
            self.attachments_resolved
        )
    }
}
