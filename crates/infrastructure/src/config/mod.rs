//! Application configuration
//!
//! Split by concern:
//! - `server`: HTTP server settings
//! - `geocoding`: Nominatim client settings
//! - `routing`: OSRM client settings
//! - `resilience`: per-attempt timeout and retry backoff
//!
//! Values are layered: built-in defaults, then an optional `config.toml`
//! in the working directory, then `WAYFINDER_*` environment variables
//! (`WAYFINDER_SERVER__PORT=8080`, `WAYFINDER_ROUTING__PROFILE=cycling`).

mod server;

use integration_directions::{NominatimConfig, OsrmConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use server::{LogFormat, ServerConfig};

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range or inconsistent
    #[error("Invalid {section} configuration: {message}")]
    Invalid {
        /// Section the value belongs to
        section: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Routing provider configuration
    #[serde(default)]
    pub routing: OsrmConfig,

    /// Timeout and retry policy shared by both providers
    #[serde(default)]
    pub resilience: RetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `file` (without extension) as the optional file source
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., WAYFINDER_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("WAYFINDER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid section found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |section: &'static str| {
            move |message: String| ConfigError::Invalid { section, message }
        };

        self.server.validate().map_err(invalid("server"))?;
        self.geocoding.validate().map_err(invalid("geocoding"))?;
        self.routing.validate().map_err(invalid("routing"))?;
        self.resilience.validate().map_err(invalid("resilience"))?;
        Ok(())
    }
}
