//! Command-line definitions

use clap::{Parser, Subcommand};

/// Server the client commands talk to unless `--url` is given
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Wayfinder CLI
#[derive(Debug, Parser)]
#[command(name = "wayfinder-cli")]
#[command(author, version, about = "Wayfinder driving directions CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a running server for directions
    Route {
        /// Start address
        source: String,

        /// End address
        destination: String,

        /// Server URL
        #[arg(short, long, env = "WAYFINDER_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Plan a route in-process, calling the providers directly
    ///
    /// Uses the same configuration sources as the server
    /// (config.toml and WAYFINDER_* variables).
    Plan {
        /// Start address
        source: String,

        /// End address
        destination: String,

        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check server health (used by container healthchecks)
    Health {
        /// Server URL
        #[arg(short, long, env = "WAYFINDER_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },
}

/// Determine log filter level from verbosity count
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Join a base URL and an absolute path
#[must_use]
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(7), "trace");
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:3000", "/v1/directions"),
            "http://localhost:3000/v1/directions"
        );
        assert_eq!(
            endpoint_url("http://localhost:3000/", "/health"),
            "http://localhost:3000/health"
        );
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
