//! Typed routing models
//!
//! The routing client converts the engine's loosely-typed JSON into these
//! structures once; missing numbers become `0.0` and missing lists become
//! empty.

use domain::LineString;
use serde::{Deserialize, Serialize};

/// A successful routing answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Alternative routes, best first (never empty when returned by a client)
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// The route the engine ranked best
    #[must_use]
    pub fn best(&self) -> Option<&Route> {
        self.routes.first()
    }
}

/// One route through all waypoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Total distance in meters
    pub distance: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Route shape, if the engine returned one
    pub geometry: Option<RouteGeometry>,
    /// One leg per consecutive pair of waypoints
    pub legs: Vec<RouteLeg>,
}

/// Route shape in either supported encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum RouteGeometry {
    /// GeoJSON line string as returned
    GeoJson {
        /// The decoded shape
        line: LineString,
    },
    /// Encoded polyline, kept alongside its decoded shape
    Polyline {
        /// The encoded string as returned
        encoded: String,
        /// The decoded shape
        line: LineString,
    },
}

impl RouteGeometry {
    /// The decoded shape regardless of encoding
    #[must_use]
    pub const fn line(&self) -> &LineString {
        match self {
            Self::GeoJson { line } | Self::Polyline { line, .. } => line,
        }
    }

    /// The encoded polyline, for the polyline variant
    #[must_use]
    pub fn encoded(&self) -> Option<&str> {
        match self {
            Self::GeoJson { .. } => None,
            Self::Polyline { encoded, .. } => Some(encoded),
        }
    }
}

/// Route between two consecutive waypoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Leg distance in meters
    pub distance: f64,
    /// Leg duration in seconds
    pub duration: f64,
    /// Names of the most significant roads
    pub summary: String,
    /// Turn-by-turn steps
    pub steps: Vec<RouteStep>,
}

/// A single maneuver followed by travel along one road
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Road name, possibly empty
    pub name: Option<String>,
    /// Step distance in meters
    pub distance: f64,
    /// Step duration in seconds
    pub duration: f64,
    /// The maneuver opening the step
    pub maneuver: StepManeuver,
}

/// Maneuver details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepManeuver {
    /// Maneuver type, e.g. `turn`, `new name`, `end_of_road`
    pub kind: Option<String>,
    /// Direction modifier, e.g. `left`, `slight right`
    pub modifier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_route() {
        let response = RouteResponse {
            routes: vec![
                Route {
                    distance: 100.0,
                    ..Route::default()
                },
                Route {
                    distance: 200.0,
                    ..Route::default()
                },
            ],
        };
        assert_eq!(response.best().map(|r| r.distance), Some(100.0));
        assert!(RouteResponse::default().best().is_none());
    }

    #[test]
    fn test_geometry_accessors() {
        let line = LineString::new(vec![[13.4, 52.5]]);
        let geojson = RouteGeometry::GeoJson { line: line.clone() };
        assert_eq!(geojson.line().len(), 1);
        assert!(geojson.encoded().is_none());

        let encoded = RouteGeometry::Polyline {
            encoded: "_p~iF~ps|U".to_string(),
            line,
        };
        assert_eq!(encoded.encoded(), Some("_p~iF~ps|U"));
    }
}
