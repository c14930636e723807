//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the Nominatim and OSRM
//! clients, loads configuration and sets up logging.

pub mod adapters;
pub mod config;
pub mod telemetry;

use std::sync::Arc;

use application::DirectionsService;
use integration_directions::{DirectionsError, NominatimGeocodingClient, OsrmRoutingClient};

pub use adapters::{GeocodingAdapter, RoutingAdapter};
pub use config::{AppConfig, ConfigError, LogFormat, ServerConfig};
pub use telemetry::{env_filter, init_logging};

/// Wire the production adapters into a [`DirectionsService`]
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be initialized.
pub fn build_directions_service(config: &AppConfig) -> Result<DirectionsService, DirectionsError> {
    let geocoder = NominatimGeocodingClient::new(&config.geocoding, &config.resilience)?;
    let router = OsrmRoutingClient::new(&config.routing, &config.resilience)?;

    Ok(DirectionsService::new(
        Arc::new(GeocodingAdapter::new(geocoder)),
        Arc::new(RoutingAdapter::new(router)),
    ))
}
