//! Tracing and logging (shared setup).

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(config::ObservabilityConfig::from_env());
}

/// Environment-driven observability settings.
pub mod config;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig, ParseLogFormatError};
