//! Logging setup
//!
//! Installs a `tracing` subscriber with an `EnvFilter` (taken from `RUST_LOG`
//! when set) and either human-readable or JSON output.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Build the filter from `RUST_LOG`, falling back to `default_directives`
#[must_use]
pub fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(format: LogFormat, default_directives: &str) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(default_directives));

    let result = match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };

    result.is_ok()
}
