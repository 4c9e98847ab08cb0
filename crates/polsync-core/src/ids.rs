//! Typed remote handles
//!
//! The identity service hands out opaque string handles for policies and
//! policy versions. Wrapping them in newtypes keeps a policy ARN from being
//! passed where a version id or a policy name is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Macro to define an opaque string handle type
macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw handle returned by the remote service.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the raw handle.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the handle, returning the raw string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_handle!(
    /// Remote identifier of a managed policy (an ARN).
    ///
    /// ```
    /// use polsync_core::PolicyArn;
    ///
    /// let arn = PolicyArn::new("arn:aws:iam::123456789012:policy/ReadOnly");
    /// assert_eq!(arn.to_string(), "arn:aws:iam::123456789012:policy/ReadOnly");
    /// ```
    PolicyArn
);

define_handle!(
    /// Identifier of a single version of a managed policy (e.g. `v3`).
    VersionId
);
