//! Routing service port
//!
//! Defines the interface for computing a drivable path between two points,
//! and the provider-neutral route shape adapters translate into. Numeric
//! fields stay raw here; formatting happens in the application layer.

use async_trait::async_trait;
use domain::{GeoPoint, LineString};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// The action a step asks the driver to perform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maneuver {
    /// Maneuver type, e.g. "turn", "new_name", "depart"
    pub kind: Option<String>,
    /// Direction modifier, e.g. "left", "slight right"
    pub modifier: Option<String>,
}

/// One step of a leg as reported by the routing provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderStep {
    /// Maneuver performed at the start of this step
    pub maneuver: Maneuver,
    /// Name of the road travelled on
    pub road_name: Option<String>,
    /// Step distance in meters
    pub distance_m: f64,
    /// Step duration in seconds
    pub duration_s: f64,
}

/// One origin-to-destination segment of an itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Steps in traversal order
    pub steps: Vec<ProviderStep>,
}

/// A single candidate route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Total distance in meters
    pub distance_m: f64,
    /// Total duration in seconds
    pub duration_s: f64,
    /// Full path geometry, if provided
    pub geometry: Option<LineString>,
    /// Encoded polyline, when the provider used that variant
    pub encoded_polyline: Option<String>,
    /// Legs in order
    pub legs: Vec<RouteLeg>,
}

/// Routing provider answer, normalized at the provider boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRoute {
    /// Candidate routes, best first
    pub itineraries: Vec<Itinerary>,
}

impl ProviderRoute {
    /// The provider's preferred itinerary
    #[must_use]
    pub fn primary(&self) -> Option<&Itinerary> {
        self.itineraries.first()
    }
}

impl Itinerary {
    /// Steps of the first leg, empty when the provider sent no legs
    #[must_use]
    pub fn first_leg_steps(&self) -> &[ProviderStep] {
        self.legs
            .first()
            .map(|leg| leg.steps.as_slice())
            .unwrap_or_default()
    }
}

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute a route from `origin` to `destination`
    ///
    /// # Errors
    ///
    /// - `NoRouteFound` when the provider reports no viable path
    /// - `Provider` when the provider answers with an unexpected HTTP status
    /// - `Transport` when the network failed on every attempt
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<ProviderRoute, ApplicationError>;
}
