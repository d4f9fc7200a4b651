//! Observability configuration read from the process environment.

use core::str::FromStr;

use thiserror::Error;

/// Env var holding the `EnvFilter` directives.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Env var selecting the log output format.
pub const FORMAT_ENV: &str = "TALLY_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

/// Log line format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line (default).
    #[default]
    Json,
    /// Multi-line, human-oriented output.
    Pretty,
    /// Single-line plain text.
    Compact,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format: {0} (expected json, pretty or compact)")]
pub struct ParseLogFormatError(String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" | "text" => Ok(LogFormat::Compact),
            other => Err(ParseLogFormatError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, e.g. `info` or `tally_invoicing=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    /// Read `RUST_LOG` and `TALLY_LOG_FORMAT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (env, file, test map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup(FILTER_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let format = match lookup(FORMAT_ENV) {
            Some(raw) => raw.parse::<LogFormat>().unwrap_or_else(|e: ParseLogFormatError| {
                // No subscriber is installed yet, so this goes to stderr.
                eprintln!("{e}; falling back to json");
                LogFormat::Json
            }),
            None => LogFormat::default(),
        };

        Self { filter, format }
    }
}
