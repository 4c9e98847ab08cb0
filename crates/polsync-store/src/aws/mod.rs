//! AWS-backed implementations of the remote collaborators.
//!
//! Uses the official SDK crates with the default credential chain. Both
//! clients share one SDK configuration built from [`StoreConfig`], with the
//! retry budget and mode applied to every call.

mod analyzer;
mod iam;

pub use analyzer::AccessAnalyzerAdvisor;
pub use iam::{IamPolicyStore, MAX_POLICY_VERSIONS};

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::config::{RetryMode, StoreConfig};
use crate::error::StoreError;

/// SDK clients for the services polsync talks to.
#[derive(Debug, Clone)]
pub struct AwsClients {
    iam: aws_sdk_iam::Client,
    analyzer: aws_sdk_accessanalyzer::Client,
}

impl AwsClients {
    /// Build clients from configuration.
    pub async fn connect(config: &StoreConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;

        tracing::info!(
            region = ?sdk_config.region().map(ToString::to_string),
            max_attempts = config.max_attempts,
            retry_mode = ?config.retry_mode,
            "AWS clients initialized"
        );

        Self {
            iam: aws_sdk_iam::Client::new(&sdk_config),
            analyzer: aws_sdk_accessanalyzer::Client::new(&sdk_config),
        }
    }

    /// Remote policy store backed by IAM.
    #[must_use]
    pub fn policy_store(&self) -> IamPolicyStore {
        IamPolicyStore::new(self.iam.clone())
    }

    /// Policy advisor backed by IAM Access Analyzer.
    #[must_use]
    pub fn advisor(&self) -> AccessAnalyzerAdvisor {
        AccessAnalyzerAdvisor::new(self.analyzer.clone())
    }
}

fn retry_config(config: &StoreConfig) -> RetryConfig {
    let base = match config.retry_mode {
        RetryMode::Standard => RetryConfig::standard(),
        RetryMode::Adaptive => RetryConfig::adaptive(),
    };
    base.with_max_attempts(config.max_attempts)
}

async fn load_sdk_config(config: &StoreConfig) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).retry_config(retry_config(config));

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    loader.load().await
}

/// Map an SDK error onto the store taxonomy.
///
/// `identifier` is what the call referred to; it becomes the `NotFound`
/// identifier.
pub(crate) fn map_sdk_error<E, R>(
    operation: &str,
    identifier: &str,
    err: aws_sdk_iam::error::SdkError<E, R>,
) -> StoreError
where
    E: aws_sdk_iam::error::ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    if matches!(
        err,
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_)
    ) {
        return StoreError::Unavailable {
            operation: operation.to_string(),
            message,
        };
    }

    error_from_code(operation, identifier, err.code(), message)
}

/// Classify a service error by its error code.
fn error_from_code(
    operation: &str,
    identifier: &str,
    code: Option<&str>,
    message: String,
) -> StoreError {
    match code {
        Some("NoSuchEntity" | "ResourceNotFoundException") => StoreError::NotFound {
            identifier: identifier.to_string(),
        },
        Some("Throttling" | "ThrottlingException" | "TooManyRequestsException") => {
            StoreError::Throttled {
                operation: operation.to_string(),
                message,
            }
        }
        Some("LimitExceeded" | "ServiceQuotaExceededException") => StoreError::LimitExceeded {
            operation: operation.to_string(),
            message,
        },
        Some("MalformedPolicyDocument") => StoreError::MalformedDocument { message },
        Some("EntityAlreadyExists") => StoreError::AlreadyExists {
            identifier: identifier.to_string(),
        },
        Some("DeleteConflict") => StoreError::DeleteConflict {
            identifier: identifier.to_string(),
            message,
        },
        Some("AccessDenied" | "AccessDeniedException") => StoreError::AccessDenied {
            operation: operation.to_string(),
            message,
        },
        code => StoreError::Service {
            operation: operation.to_string(),
            code: code.map(str::to_string),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_conflict_is_named() {
        let arn = "arn:aws:iam::123456789012:policy/Legacy";
        let err = error_from_code(
            "DeletePolicy",
            arn,
            Some("DeleteConflict"),
            "Cannot delete a policy attached to entities.".to_string(),
        );
        assert!(matches!(err, StoreError::DeleteConflict { ref identifier, .. } if identifier == arn));
        assert_eq!(err.error_code(), "DELETE_CONFLICT");
    }

    #[test]
    fn test_unknown_code_keeps_code() {
        let err = error_from_code("DeletePolicy", "x", Some("ServiceFailure"), "boom".to_string());
        assert!(matches!(err, StoreError::Service { code: Some(ref c), .. } if c == "ServiceFailure"));
    }

    #[test]
    fn test_no_such_entity_is_not_found() {
        let err = error_from_code("GetPolicy", "arn:x", Some("NoSuchEntity"), String::new());
        assert!(err.is_not_found());
    }

    #[test]
    fn test_retry_config_uses_configured_attempts() {
        let config = StoreConfig {
            max_attempts: 42,
            ..StoreConfig::default()
        };
        assert_eq!(retry_config(&config).max_attempts(), 42);
    }

    #[test]
    fn test_retry_config_mode() {
        use aws_config::retry::RetryMode as SdkRetryMode;

        let adaptive = retry_config(&StoreConfig::default());
        assert_eq!(adaptive.mode(), SdkRetryMode::Adaptive);

        let standard = retry_config(&StoreConfig {
            retry_mode: RetryMode::Standard,
            ..StoreConfig::default()
        });
        assert_eq!(standard.mode(), SdkRetryMode::Standard);
    }
}
