//! Driving directions integration for Wayfinder
//!
//! Provides address geocoding via [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org)
//! and driving routes via the [OSRM](https://project-osrm.org) route service.
//!
//! # Architecture
//!
//! Both clients issue their HTTP calls through a [`ResilientFetcher`], which
//! bounds every attempt with a deadline and retries transport failures with
//! exponential backoff according to a [`RetryConfig`]. Any HTTP response,
//! successful or not, is handed back to the client without retrying.
//!
//! Provider payloads are deserialized into loose raw types and converted once
//! into the typed models in [`models`]; nothing past the client sees the raw
//! shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_directions::{
//!     GeocodingClient, NominatimConfig, NominatimGeocodingClient, OsrmConfig,
//!     OsrmRoutingClient, RetryConfig, RoutingClient,
//! };
//!
//! let policy = RetryConfig::default();
//! let geocoder = NominatimGeocodingClient::new(&NominatimConfig::default(), &policy)?;
//! let router = OsrmRoutingClient::new(&OsrmConfig::default(), &policy)?;
//!
//! let from = geocoder.geocode("Brandenburger Tor, Berlin").await?;
//! let to = geocoder.geocode("Sanssouci, Potsdam").await?;
//! let response = router.route(&from, &to).await?;
//! ```

mod config;
mod error;
mod fetch;
mod geocoding;
pub mod models;
pub mod polyline;
mod retry;
mod routing;

pub use config::{GeometryFormat, OsrmConfig};
pub use error::{DirectionsError, TransportKind};
pub use fetch::ResilientFetcher;
pub use geocoding::{GeocodingClient, NominatimConfig, NominatimGeocodingClient};
pub use models::{RouteGeometry, RouteResponse};
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use routing::{OsrmRoutingClient, RoutingClient};
