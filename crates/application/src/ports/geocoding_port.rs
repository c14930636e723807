//! Geocoding service port
//!
//! Resolves a free-text address into a single [`GeoPoint`].

use async_trait::async_trait;
use domain::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address resolution
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address to the provider's first candidate
    ///
    /// # Errors
    ///
    /// - `LocationNotFound` when the provider returns no candidates
    /// - `Provider` when the provider answers with a non-success status
    /// - `Transport` when the network failed on every attempt
    async fn resolve(&self, query: &str) -> Result<GeoPoint, ApplicationError>;
}
