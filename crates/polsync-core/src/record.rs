//! Policy records and documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::ids::PolicyArn;

/// Key reported by [`PolicyDocument::changed_keys`] when the documents are
/// not both JSON objects.
pub const ROOT_KEY: &str = "$";

/// An opaque structured policy body.
///
/// The document is never interpreted beyond what serialization needs.
/// Key order is kept exactly as loaded, and equality is structural, so two
/// documents with the same members in a different order compare equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyDocument(Value);

impl PolicyDocument {
    /// Wrap a JSON value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a document from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the document, returning the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Compact JSON text sent to the remote service.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Top-level keys whose values differ between `self` and `other`.
    ///
    /// Keys are reported in `self`'s order first, followed by keys only
    /// present in `other`. Returns `["$"]` when either side is not an object
    /// and the documents differ.
    #[must_use]
    pub fn changed_keys(&self, other: &PolicyDocument) -> Vec<String> {
        match (&self.0, &other.0) {
            (Value::Object(left), Value::Object(right)) => {
                let mut keys: Vec<String> = left
                    .iter()
                    .filter(|(key, value)| right.get(key.as_str()) != Some(*value))
                    .map(|(key, _)| key.clone())
                    .collect();
                keys.extend(
                    right
                        .keys()
                        .filter(|key| !left.contains_key(key.as_str()))
                        .cloned(),
                );
                keys
            }
            (left, right) if left == right => Vec::new(),
            _ => vec![ROOT_KEY.to_string()],
        }
    }
}

impl From<Value> for PolicyDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A managed policy, either desired (loaded from the repository) or current
/// (returned by the remote store).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRecord {
    /// Natural key, unique within the target scope.
    pub name: String,
    /// Policy body.
    pub document: PolicyDocument,
    /// Handle assigned by the remote service. Absent for records that only
    /// exist in the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<PolicyArn>,
    /// Remote identifiers this record declares it depends on.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<PolicyArn>,
    /// Repository file the record was loaded from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PolicyRecord {
    /// Create a desired-state record.
    #[must_use]
    pub fn desired(name: impl Into<String>, document: PolicyDocument) -> Self {
        Self {
            name: name.into(),
            document,
            remote_id: None,
            attachments: Vec::new(),
            source: None,
        }
    }

    /// Create a current-state record for a policy the remote store returned.
    #[must_use]
    pub fn current(name: impl Into<String>, remote_id: PolicyArn, document: PolicyDocument) -> Self {
        Self {
            name: name.into(),
            document,
            remote_id: Some(remote_id),
            attachments: Vec::new(),
            source: None,
        }
    }

    /// Set the declared attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<PolicyArn>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Record the file this policy was loaded from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether the remote store already knows this policy.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.remote_id.is_some()
    }

    /// File name the record came from, if any.
    #[must_use]
    pub fn source_file_name(&self) -> Option<&str> {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }
}
