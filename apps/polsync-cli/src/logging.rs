//! Log level selection for the CLI.
//!
//! Levels are cumulative: Debug includes Verbose.

use std::fmt;

use tracing_subscriber::EnvFilter;

/// Verbosity level for CLI output
///
/// Levels are ordered: Normal < Verbose < Debug
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Progress and outcome lines only (default)
    #[default]
    Normal = 0,
    /// Per-policy decisions and remote calls
    Verbose = 1,
    /// Everything, including pagination and SDK internals
    Debug = 2,
}

impl LogLevel {
    /// Create LogLevel from CLI flags
    ///
    /// Returns the highest level specified by flags.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        match self {
            Self::Normal => "info,polsync=info",
            Self::Verbose => {
                "info,polsync=debug,polsync_core=debug,polsync_store=debug,polsync_engine=debug"
            }
            Self::Debug => {
                "debug,polsync=trace,polsync_core=trace,polsync_store=trace,polsync_engine=trace"
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Verbose => "VERBOSE",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Install the global subscriber. Logs go to stderr so that `--json`
/// output on stdout stays parseable.
pub fn init(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.default_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
