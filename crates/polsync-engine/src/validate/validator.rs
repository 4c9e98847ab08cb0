//! Validator facade.

use tracing::info;

use polsync_core::PolicyRecord;
use polsync_store::{PolicyAdvisor, PolicyType, RemotePolicyStore, StoreConfig};

use super::checks::{check_attachments, check_static_analysis, check_uniqueness, Check};
use super::report::ValidationReport;
use crate::error::ValidationResult;

/// Validator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Locale for advisor finding text.
    pub locale: String,
    pub policy_type: PolicyType,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            locale: polsync_store::config::DEFAULT_LOCALE.to_string(),
            policy_type: PolicyType::IdentityPolicy,
        }
    }
}

impl From<&StoreConfig> for ValidatorConfig {
    fn from(config: &StoreConfig) -> Self {
        Self {
            locale: config.locale.clone(),
            ..Self::default()
        }
    }
}

/// Runs the checks of [`Check::ORDER`] over a desired record list.
///
/// The first failing check ends the run; later checks never start.
pub struct Validator<'a> {
    advisor: &'a dyn PolicyAdvisor,
    store: &'a dyn RemotePolicyStore,
    config: ValidatorConfig,
}

impl<'a> Validator<'a> {
    pub fn new(advisor: &'a dyn PolicyAdvisor, store: &'a dyn RemotePolicyStore) -> Self {
        Self::with_config(advisor, store, ValidatorConfig::default())
    }

    pub fn with_config(
        advisor: &'a dyn PolicyAdvisor,
        store: &'a dyn RemotePolicyStore,
        config: ValidatorConfig,
    ) -> Self {
        Self {
            advisor,
            store,
            config,
        }
    }

    /// Validate `records` as loaded from the repository.
    pub async fn validate(&self, records: &[PolicyRecord]) -> ValidationResult<ValidationReport> {
        let mut report = ValidationReport {
            records_checked: records.len(),
            ..ValidationReport::default()
        };

        for check in Check::ORDER {
            info!(check = %check, records = records.len(), "Running check");
            match check {
                Check::Uniqueness => check_uniqueness(records)?,
                Check::StaticAnalysis => {
                    check_static_analysis(
                        self.advisor,
                        records,
                        &self.config.locale,
                        self.config.policy_type,
                        &mut report,
                    )
                    .await?
                }
                Check::Attachments => check_attachments(self.store, records, &mut report).await?,
            }
        }

        info!(report = %report, "Validation passed");
        Ok(report)
    }
}
