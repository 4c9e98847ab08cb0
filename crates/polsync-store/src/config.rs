//! Remote client configuration parsed from environment variables.

/// Default attempt ceiling. Throttling is common when many policies change
/// at once; the run should wait it out rather than fail.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Default locale for policy advisor findings.
pub const DEFAULT_LOCALE: &str = "EN";

/// Retry strategy for the remote clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryMode {
    /// Standard exponential backoff.
    Standard,
    /// Standard backoff plus client-side rate limiting on throttling.
    #[default]
    Adaptive,
}

impl RetryMode {
    /// Parse from string value (case-insensitive).
    pub fn from_str_value(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(ConfigError::InvalidValue(
                "POLSYNC_RETRY_MODE".into(),
                format!("unknown retry mode '{other}'. Valid options: standard, adaptive"),
            )),
        }
    }
}

/// Configuration for the IAM and Access Analyzer clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Region override. `None` uses the SDK's default provider chain.
    pub region: Option<String>,
    /// Maximum attempts per remote call, including the first.
    pub max_attempts: u32,
    pub retry_mode: RetryMode,
    /// Locale for advisor findings.
    pub locale: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_mode: RetryMode::Adaptive,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let region = reader("POLSYNC_AWS_REGION")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let max_attempts = reader("POLSYNC_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidValue("POLSYNC_MAX_ATTEMPTS".into(), e.to_string()))?;

        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "POLSYNC_MAX_ATTEMPTS".into(),
                "must be at least 1".into(),
            ));
        }

        let retry_mode = match reader("POLSYNC_RETRY_MODE") {
            Ok(value) => RetryMode::from_str_value(&value)?,
            Err(_) => RetryMode::default(),
        };

        let locale = reader("POLSYNC_ANALYZER_LOCALE")
            .unwrap_or_else(|_| DEFAULT_LOCALE.to_string())
            .to_uppercase();

        Ok(Self {
            region,
            max_attempts,
            retry_mode,
            locale,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
