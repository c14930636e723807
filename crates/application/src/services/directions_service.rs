//! Directions service - the request pipeline
//!
//! Resolves both addresses concurrently, routes between the resolved points
//! and formats the provider answer into a [`RouteResult`]. Holds no state
//! between calls; concurrent invocations are independent.

use std::fmt;
use std::sync::Arc;

use domain::RouteResult;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, RoutingPort};
use crate::services::route_formatter::format_route;

/// Orchestrates geocoding and routing for a single directions request
#[derive(Clone)]
pub struct DirectionsService {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
}

impl fmt::Debug for DirectionsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionsService")
            .field("geocoder", &"<dyn GeocodingPort>")
            .field("router", &"<dyn RoutingPort>")
            .finish()
    }
}

impl DirectionsService {
    /// Create a new directions service
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self { geocoder, router }
    }

    /// Plan a route between two free-text addresses
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if either address is empty (no provider is called)
    /// - any geocoding error for either address, first failure wins
    /// - any routing error
    #[instrument(skip(self))]
    pub async fn plan(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<RouteResult, ApplicationError> {
        let source = source.trim();
        let destination = destination.trim();

        if source.is_empty() || destination.is_empty() {
            warn!(
                has_source = !source.is_empty(),
                has_destination = !destination.is_empty(),
                "Missing required fields"
            );
            return Err(ApplicationError::InvalidRequest(
                "Source and destination are required".to_string(),
            ));
        }

        info!("Geocoding source and destination");
        let (start, end) = tokio::try_join!(
            self.geocoder.resolve(source),
            self.geocoder.resolve(destination),
        )?;

        debug!(
            src_lat = start.lat(),
            src_lon = start.lon(),
            dst_lat = end.lat(),
            dst_lon = end.lon(),
            "Requesting route"
        );
        let route = self.router.route(&start, &end).await?;

        let result = format_route(&route, start, end)?;

        info!(
            distance = %result.distance(),
            duration = %result.duration(),
            steps = result.steps().len(),
            "Route prepared"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderKind, TransportFailureKind};
    use crate::ports::{
        Itinerary, Maneuver, MockGeocodingPort, MockRoutingPort, ProviderRoute, ProviderStep,
        RouteLeg,
    };
    use domain::{GeoPoint, LineString};

    fn point_for(query: &str) -> GeoPoint {
        match query {
            "Berlin" => GeoPoint::new(52.517, 13.389, "Berlin, Germany").unwrap(),
            "Potsdam" => GeoPoint::new(52.400, 13.059, "Potsdam, Germany").unwrap(),
            other => GeoPoint::new(0.0, 0.0, other).unwrap(),
        }
    }

    fn provider_route(step_count: usize) -> ProviderRoute {
        let steps = (0..step_count)
            .map(|i| ProviderStep {
                maneuver: Maneuver {
                    kind: Some("turn".to_string()),
                    modifier: Some("Right".to_string()),
                },
                road_name: Some(format!("Street {i}")),
                distance_m: 500.0,
                duration_s: 60.0,
            })
            .collect();

        ProviderRoute {
            itineraries: vec![Itinerary {
                distance_m: 34_567.0,
                duration_s: 2_400.0,
                geometry: Some(LineString::new(vec![[13.389, 52.517], [13.059, 52.400]])),
                encoded_polyline: None,
                legs: vec![RouteLeg { steps }],
            }],
        }
    }

    fn geocoder_ok() -> MockGeocodingPort {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_resolve()
            .returning(|query| Ok(point_for(query)));
        geocoder
    }

    fn router_ok(step_count: usize) -> MockRoutingPort {
        let mut router = MockRoutingPort::new();
        router
            .expect_route()
            .returning(move |_, _| Ok(provider_route(step_count)));
        router
    }

    fn service(geocoder: MockGeocodingPort, router: MockRoutingPort) -> DirectionsService {
        DirectionsService::new(Arc::new(geocoder), Arc::new(router))
    }

    #[tokio::test]
    async fn plan_returns_formatted_route() {
        let svc = service(geocoder_ok(), router_ok(3));

        let result = svc.plan("Berlin", "Potsdam").await.unwrap();

        assert_eq!(result.distance(), "34.6 km");
        assert_eq!(result.duration(), "40 min");
        assert_eq!(result.steps().len(), 3);
        assert_eq!(result.steps()[0].instruction, "turn right on Street 0");
        assert_eq!(result.steps()[0].distance, "500 m");
        assert_eq!(result.steps()[0].duration, "1 min");
        assert_eq!(result.start().label(), "Berlin, Germany");
        assert_eq!(result.end().label(), "Potsdam, Germany");
    }

    #[tokio::test]
    async fn plan_passes_resolved_points_to_router() {
        let mut router = MockRoutingPort::new();
        router
            .expect_route()
            .withf(|origin, destination| {
                origin.label() == "Berlin, Germany" && destination.label() == "Potsdam, Germany"
            })
            .times(1)
            .returning(|_, _| Ok(provider_route(1)));

        let svc = service(geocoder_ok(), router);
        assert!(svc.plan("Berlin", "Potsdam").await.is_ok());
    }

    #[tokio::test]
    async fn plan_trims_addresses_before_geocoding() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_resolve()
            .withf(|q| q == "Berlin")
            .times(1)
            .returning(|q| Ok(point_for(q)));
        geocoder
            .expect_resolve()
            .withf(|q| q == "Potsdam")
            .times(1)
            .returning(|q| Ok(point_for(q)));

        let svc = service(geocoder, router_ok(1));
        assert!(svc.plan("  Berlin ", "\tPotsdam\n").await.is_ok());
    }

    #[tokio::test]
    async fn empty_source_fails_before_any_provider_call() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_resolve().never();
        let mut router = MockRoutingPort::new();
        router.expect_route().never();

        let svc = service(geocoder, router);
        let err = svc.plan("", "Potsdam").await.unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidRequest(_)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn whitespace_destination_is_invalid() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_resolve().never();
        let mut router = MockRoutingPort::new();
        router.expect_route().never();

        let svc = service(geocoder, router);
        let err = svc.plan("Berlin", "   ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn destination_not_found_fails_whole_plan() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_resolve()
            .withf(|q| q == "Berlin")
            .returning(|q| Ok(point_for(q)));
        geocoder
            .expect_resolve()
            .withf(|q| q == "Atlantis")
            .returning(|q| Err(ApplicationError::location_not_found(q)));
        let mut router = MockRoutingPort::new();
        router.expect_route().never();

        let svc = service(geocoder, router);
        let err = svc.plan("Berlin", "Atlantis").await.unwrap_err();

        assert!(matches!(err, ApplicationError::LocationNotFound { .. }));
        assert!(err.to_string().contains("Location not found"));
        assert!(err.user_message().contains("Could not find"));
    }

    #[tokio::test]
    async fn transport_failure_propagates_unchanged() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_resolve().returning(|_| {
            Err(ApplicationError::transport(
                TransportFailureKind::Timeout,
                "deadline elapsed",
            ))
        });
        let mut router = MockRoutingPort::new();
        router.expect_route().never();

        let svc = service(geocoder, router);
        let err = svc.plan("Berlin", "Potsdam").await.unwrap_err();
        assert_eq!(
            err,
            ApplicationError::transport(TransportFailureKind::Timeout, "deadline elapsed")
        );
    }

    #[tokio::test]
    async fn routing_failure_discards_geocoding_results() {
        let mut router = MockRoutingPort::new();
        router
            .expect_route()
            .returning(|_, _| Err(ApplicationError::no_route("Impossible route")));

        let svc = service(geocoder_ok(), router);
        let err = svc.plan("Berlin", "Potsdam").await.unwrap_err();
        assert_eq!(err, ApplicationError::no_route("Impossible route"));
    }

    #[tokio::test]
    async fn provider_error_from_geocoder_is_not_client_error() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_resolve().returning(|_| {
            Err(ApplicationError::Provider {
                provider: ProviderKind::Geocoding,
                status: 503,
            })
        });
        let mut router = MockRoutingPort::new();
        router.expect_route().never();

        let svc = service(geocoder, router);
        let err = svc.plan("Berlin", "Potsdam").await.unwrap_err();
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn empty_provider_route_is_no_route() {
        let mut router = MockRoutingPort::new();
        router
            .expect_route()
            .returning(|_, _| Ok(ProviderRoute::default()));

        let svc = service(geocoder_ok(), router);
        let err = svc.plan("Berlin", "Potsdam").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NoRouteFound { .. }));
    }

    #[tokio::test]
    async fn step_count_matches_provider_leg() {
        for count in [0, 1, 7, 42] {
            let svc = service(geocoder_ok(), router_ok(count));
            let result = svc.plan("Berlin", "Potsdam").await.unwrap();
            assert_eq!(result.steps().len(), count);
        }
    }

    #[tokio::test]
    async fn repeated_plans_are_byte_identical() {
        let svc = service(geocoder_ok(), router_ok(5));

        let first = serde_json::to_vec(&svc.plan("Berlin", "Potsdam").await.unwrap()).unwrap();
        let second = serde_json::to_vec(&svc.plan("Berlin", "Potsdam").await.unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
