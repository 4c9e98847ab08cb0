//! Remote store error types
//!
//! Error definitions with transient/permanent classification. The AWS
//! clients already retry transient failures with adaptive backoff, so a
//! transient error reaching the engine means the retry budget is exhausted.

use thiserror::Error;

/// Result type for remote store and advisor calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error that can occur while talking to a remote service.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced policy or version does not exist.
    #[error("not found: {identifier}")]
    NotFound { identifier: String },

    /// The service kept throttling requests after all retries.
    #[error("{operation} throttled: {message}")]
    Throttled { operation: String, message: String },

    /// The service could not be reached.
    #[error("{operation} failed to reach service: {message}")]
    Unavailable { operation: String, message: String },

    /// A service quota was hit (e.g. policy version limit).
    #[error("{operation} limit exceeded: {message}")]
    LimitExceeded { operation: String, message: String },

    /// The service rejected the policy document.
    #[error("malformed policy document: {message}")]
    MalformedDocument { message: String },

    /// The policy already exists.
    #[error("already exists: {identifier}")]
    AlreadyExists { identifier: String },

    /// The policy still has versions or attachments that block deletion.
    #[error("delete conflict for {identifier}: {message}")]
    DeleteConflict { identifier: String, message: String },

    /// The caller is not allowed to perform the operation.
    #[error("{operation} access denied: {message}")]
    AccessDenied { operation: String, message: String },

    /// Any other service-side failure.
    #[error("{operation} failed{}: {message}", code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Service {
        operation: String,
        code: Option<String>,
        message: String,
    },

    /// The response was missing a field the caller needs.
    #[error("invalid {operation} response: {message}")]
    InvalidResponse { operation: String, message: String },

    /// A paginated listing returned a continuation token it already returned.
    #[error("pagination did not advance for {operation}: token {token} repeated")]
    PaginationStalled { operation: String, token: String },

    /// A document could not be serialized or parsed.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl StoreError {
    /// Check if this error is transient and the operation could succeed later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Throttled { .. } | StoreError::Unavailable { .. }
        )
    }

    /// Check if this error is permanent and retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Whether the error means the referenced object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "NOT_FOUND",
            StoreError::Throttled { .. } => "THROTTLED",
            StoreError::Unavailable { .. } => "UNAVAILABLE",
            StoreError::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            StoreError::MalformedDocument { .. } => "MALFORMED_DOCUMENT",
            StoreError::AlreadyExists { .. } => "ALREADY_EXISTS",
            StoreError::DeleteConflict { .. } => "DELETE_CONFLICT",
            StoreError::AccessDenied { .. } => "ACCESS_DENIED",
            StoreError::Service { .. } => "SERVICE_ERROR",
            StoreError::InvalidResponse { .. } => "INVALID_RESPONSE",
            StoreError::PaginationStalled { .. } => "PAGINATION_STALLED",
            StoreError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }

    // Convenience constructors

    /// Create a not found error.
    pub fn not_found(identifier: impl Into<String>) -> Self {
        StoreError::NotFound {
            identifier: identifier.into(),
        }
    }

    /// Create a generic service error.
    pub fn service(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Service {
            operation: operation.into(),
            code: None,
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::InvalidResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let throttled = StoreError::Throttled {
            operation: "ListPolicies".to_string(),
            message: "Rate exceeded".to_string(),
        };
        assert!(throttled.is_transient());
        assert!(!throttled.is_permanent());

        let missing = StoreError::not_found("arn:aws:iam::aws:policy/Nope");
        assert!(missing.is_permanent());
        assert!(missing.is_not_found());
        assert_eq!(missing.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_service_error_display_with_code() {
        let err = StoreError::Service {
            operation: "CreatePolicy".to_string(),
            code: Some("ServiceFailure".to_string()),
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "CreatePolicy failed (ServiceFailure): internal");

        let err = StoreError::service("DeletePolicy", "boom");
        assert_eq!(err.to_string(), "DeletePolicy failed: boom");
    }

    #[test]
    fn test_from_serde_error() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: StoreError = parse.unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
