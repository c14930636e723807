//! Directions adapters - Implement GeocodingPort and RoutingPort using integration_directions

use application::error::{ApplicationError, ProviderKind, TransportFailureKind};
use application::ports::{
    GeocodingPort, Itinerary, Maneuver, ProviderRoute, ProviderStep, RouteLeg, RoutingPort,
};
use async_trait::async_trait;
use domain::GeoPoint;
use integration_directions::models::{Route, RouteStep};
use integration_directions::{
    DirectionsError, GeocodingClient, NominatimGeocodingClient, OsrmRoutingClient, RouteResponse,
    RoutingClient, TransportKind,
};
use tracing::{debug, instrument, warn};

/// Translate an integration error into the application taxonomy
///
/// `provider` decides how HTTP status failures are attributed.
pub(crate) fn map_directions_error(provider: ProviderKind, err: DirectionsError) -> ApplicationError {
    match err {
        DirectionsError::Transport { kind, message } => {
            let kind = match kind {
                TransportKind::Timeout => TransportFailureKind::Timeout,
                TransportKind::Connect => TransportFailureKind::Connect,
                TransportKind::Other => TransportFailureKind::Other,
            };
            ApplicationError::transport(kind, message)
        },
        DirectionsError::RequestFailed { status } => ApplicationError::Provider { provider, status },
        DirectionsError::ParseError(msg) => ApplicationError::InvalidResponse(msg),
        DirectionsError::AddressNotFound(query) => ApplicationError::location_not_found(query),
        DirectionsError::NoRoute { message, .. } => ApplicationError::no_route(message),
        DirectionsError::ConfigurationError(msg) => ApplicationError::Internal(msg),
    }
}

/// Adapter for address lookup backed by Nominatim
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"<dyn GeocodingClient>")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter around a Nominatim client
    #[must_use]
    pub fn new(client: NominatimGeocodingClient) -> Self {
        Self::with_client(client)
    }

    /// Create an adapter around any geocoding client
    #[must_use]
    pub fn with_client(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn resolve(&self, query: &str) -> Result<GeoPoint, ApplicationError> {
        self.client.geocode(query).await.map_err(|e| {
            warn!(error = %e, "Geocoding failed");
            map_directions_error(ProviderKind::Geocoding, e)
        })
    }
}

/// Adapter for route computation backed by OSRM
pub struct RoutingAdapter {
    client: Box<dyn RoutingClient>,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"<dyn RoutingClient>")
            .finish()
    }
}

impl RoutingAdapter {
    /// Create an adapter around an OSRM client
    #[must_use]
    pub fn new(client: OsrmRoutingClient) -> Self {
        Self::with_client(client)
    }

    /// Create an adapter around any routing client
    #[must_use]
    pub fn with_client(client: impl RoutingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    fn convert_step(step: RouteStep) -> ProviderStep {
        ProviderStep {
            maneuver: Maneuver {
                kind: step.maneuver.kind,
                modifier: step.maneuver.modifier,
            },
            road_name: step.name,
            distance_m: step.distance,
            duration_s: step.duration,
        }
    }

    fn convert_route(route: Route) -> Itinerary {
        let (geometry, encoded_polyline) = match route.geometry {
            Some(geometry) => (
                Some(geometry.line().clone()),
                geometry.encoded().map(str::to_string),
            ),
            None => (None, None),
        };

        Itinerary {
            distance_m: route.distance,
            duration_s: route.duration,
            geometry,
            encoded_polyline,
            legs: route
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    steps: leg.steps.into_iter().map(Self::convert_step).collect(),
                })
                .collect(),
        }
    }

    fn convert_response(response: RouteResponse) -> ProviderRoute {
        ProviderRoute {
            itineraries: response
                .routes
                .into_iter()
                .map(Self::convert_route)
                .collect(),
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, origin, destination))]
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<ProviderRoute, ApplicationError> {
        let response = self
            .client
            .route(origin, destination)
            .await
            .map_err(|e| {
                warn!(error = %e, "Routing failed");
                map_directions_error(ProviderKind::Routing, e)
            })?;

        let summary = response
            .best()
            .and_then(|route| route.legs.first())
            .map_or("", |leg| leg.summary.as_str());
        debug!(routes = response.routes.len(), %summary, "Routing succeeded");
        Ok(Self::convert_response(response))
    }
}
