//! The individual validation checks.
//!
//! Each check receives the records it inspects explicitly and returns the
//! first failure it finds.

use serde::Serialize;
use tracing::{debug, warn};

use polsync_core::{duplicate_names, PolicyRecord};
use polsync_store::{
    AnalysisRequest, AnalyzePolicy, Finding, Paginator, PolicyAdvisor, PolicyType,
    RemotePolicyStore,
};

use super::report::{ValidationReport, ValidationWarning};
use crate::error::{ValidationError, ValidationResult};

/// Validation checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Uniqueness,
    StaticAnalysis,
    Attachments,
}

impl Check {
    pub const ORDER: [Check; 3] = [Check::Uniqueness, Check::StaticAnalysis, Check::Attachments];
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Uniqueness => write!(f, "uniqueness"),
            Check::StaticAnalysis => write!(f, "static analysis"),
            Check::Attachments => write!(f, "attachment integrity"),
        }
    }
}

/// No two records may share a name.
pub fn check_uniqueness(records: &[PolicyRecord]) -> ValidationResult<()> {
    let names = duplicate_names(records);
    if names.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::DuplicateNames { names })
    }
}

/// Fetch every finding for one record's document.
pub async fn analyze_record(
    advisor: &dyn PolicyAdvisor,
    record: &PolicyRecord,
    locale: &str,
    policy_type: PolicyType,
) -> ValidationResult<Vec<Finding>> {
    let document =
        record
            .document
            .to_json_string()
            .map_err(|source| ValidationError::Serialization {
                name: record.name.clone(),
                source,
            })?;

    let request = AnalysisRequest {
        document,
        locale: locale.to_string(),
        policy_type,
    };

    Paginator::new(AnalyzePolicy::new(advisor, request))
        .drain()
        .await
        .map_err(|source| ValidationError::Advisor {
            name: record.name.clone(),
            source,
        })
}

/// Submit each document to the advisor. The first blocking finding fails
/// the run; warnings before it are added to `report`.
pub async fn check_static_analysis(
    advisor: &dyn PolicyAdvisor,
    records: &[PolicyRecord],
    locale: &str,
    policy_type: PolicyType,
    report: &mut ValidationReport,
) -> ValidationResult<()> {
    for record in records {
        let findings = analyze_record(advisor, record, locale, policy_type).await?;
        debug!(policy = %record.name, findings = findings.len(), "Analysed policy");
        report.findings_seen += findings.len();

        for finding in &findings {
            if finding.severity.is_blocking() {
                return Err(ValidationError::Finding {
                    name: record.name.clone(),
                    issue_code: finding.issue_code.clone(),
                    detail: finding.detail.clone(),
                });
            }
            if finding.severity.is_warning() {
                warn!(
                    policy = %record.name,
                    severity = %finding.severity,
                    issue_code = %finding.issue_code,
                    "{}",
                    finding.detail
                );
                report
                    .warnings
                    .push(ValidationWarning::from_finding(&record.name, finding));
            }
        }
    }
    Ok(())
}

/// Resolve every attached policy identifier through the store.
pub async fn check_attachments(
    store: &dyn RemotePolicyStore,
    records: &[PolicyRecord],
    report: &mut ValidationReport,
) -> ValidationResult<()> {
    for record in records {
        for identifier in &record.attachments {
            store
                .get_policy(identifier)
                .await
                .map_err(|source| ValidationError::Attachment {
                    name: record.name.clone(),
                    identifier: identifier.clone(),
                    source,
                })?;
            debug!(policy = %record.name, attachment = %identifier, "Attachment resolved");
            report.attachments_resolved += 1;
        }
    }
    Ok(())
}
