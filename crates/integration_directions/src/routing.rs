//! OSRM routing client
//!
//! Requests driving routes from the [OSRM](https://project-osrm.org) route
//! service with full overview geometry and turn-by-turn steps.
//!
//! OSRM reports failures in the body (`code` other than `"Ok"`), often with
//! a 4xx status, so the body is parsed before the status is considered.

use async_trait::async_trait;
use domain::{GeoPoint, LineString};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::{GeometryFormat, OsrmConfig};
use crate::error::DirectionsError;
use crate::fetch::ResilientFetcher;
use crate::models::{Route, RouteGeometry, RouteLeg, RouteResponse, RouteStep, StepManeuver};
use crate::polyline;
use crate::retry::RetryConfig;

const OK_CODE: &str = "Ok";
const NO_ROUTE_MESSAGE: &str = "No route found";

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Compute a route from `origin` to `destination`
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteResponse, DirectionsError>;
}

/// OSRM-based routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    fetcher: ResilientFetcher,
    config: OsrmConfig,
    headers: HeaderMap,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized or the
    /// configured language is not a valid header value.
    pub fn new(config: &OsrmConfig, policy: &RetryConfig) -> Result<Self, DirectionsError> {
        Ok(Self {
            fetcher: ResilientFetcher::with_policy(policy.clone())?,
            headers: config.headers()?,
            config: config.clone(),
        })
    }

    fn route_url(&self, origin: &GeoPoint, destination: &GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.lon_lat(),
            destination.lon_lat()
        )
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("overview", "full".to_string()),
            ("geometries", self.config.geometries.as_param().to_string()),
            ("steps", "true".to_string()),
        ]
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self, origin, destination), fields(origin = %origin, destination = %destination))]
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteResponse, DirectionsError> {
        let url = self.route_url(origin, destination);
        debug!(%url, "Requesting route");

        let response = self
            .fetcher
            .get(&url, &self.query_params(), &self.headers)
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        let raw: RawRouteResponse = match serde_json::from_str(&body) {
            Ok(raw) => raw,
            Err(_) if !status.is_success() => {
                return Err(DirectionsError::RequestFailed {
                    status: status.as_u16(),
                });
            },
            Err(e) => return Err(DirectionsError::ParseError(e.to_string())),
        };

        if raw.code.is_none() && !status.is_success() {
            return Err(DirectionsError::RequestFailed {
                status: status.as_u16(),
            });
        }

        raw.into_response(self.config.geometries)
    }
}

/// Raw OSRM route response
#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    distance: Option<f64>,
    duration: Option<f64>,
    geometry: Option<RawGeometry>,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGeometry {
    GeoJson(LineString),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    distance: Option<f64>,
    duration: Option<f64>,
    summary: Option<String>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    name: Option<String>,
    distance: Option<f64>,
    duration: Option<f64>,
    #[serde(default)]
    maneuver: RawManeuver,
}

#[derive(Debug, Default, Deserialize)]
struct RawManeuver {
    #[serde(rename = "type")]
    kind: Option<String>,
    modifier: Option<String>,
}

impl RawRouteResponse {
    fn into_response(self, format: GeometryFormat) -> Result<RouteResponse, DirectionsError> {
        let code = self.code.unwrap_or_default();
        if code != OK_CODE || self.routes.is_empty() {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| NO_ROUTE_MESSAGE.to_string());
            warn!(%code, %message, "Routing engine returned no route");
            return Err(DirectionsError::NoRoute { code, message });
        }

        let routes = self
            .routes
            .into_iter()
            .map(|route| route.into_route(format))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteResponse { routes })
    }
}

impl RawRoute {
    fn into_route(self, format: GeometryFormat) -> Result<Route, DirectionsError> {
        let geometry = match self.geometry {
            None => None,
            Some(RawGeometry::GeoJson(line)) => Some(RouteGeometry::GeoJson { line }),
            Some(RawGeometry::Encoded(encoded)) => {
                let line = polyline::decode(&encoded, format.precision().unwrap_or(5))?;
                Some(RouteGeometry::Polyline { encoded, line })
            },
        };

        Ok(Route {
            distance: self.distance.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            geometry,
            legs: self.legs.into_iter().map(RawLeg::into_leg).collect(),
        })
    }
}

impl RawLeg {
    fn into_leg(self) -> RouteLeg {
        RouteLeg {
            distance: self.distance.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            steps: self
                .steps
                .into_iter()
                .map(|step| RouteStep {
                    name: step.name,
                    distance: step.distance.unwrap_or_default(),
                    duration: step.duration.unwrap_or_default(),
                    maneuver: StepManeuver {
                        kind: step.maneuver.kind,
                        modifier: step.maneuver.modifier,
                    },
                })
                .collect(),
        }
    }
}
