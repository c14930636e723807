//! Route result entities
//!
//! [`RouteResult`] is the stable, rendering-ready contract returned to callers
//! regardless of which geocoding or routing provider produced it. All text
//! fields are already human formatted.

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, LineString};

/// One turn-by-turn instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Instruction text, e.g. "turn left on Main St"
    pub instruction: String,
    /// Human-formatted distance, e.g. "350 m"
    pub distance: String,
    /// Human-formatted duration, e.g. "2 min"
    pub duration: String,
}

impl RouteStep {
    /// Create a new route step
    #[must_use]
    pub fn new(
        instruction: impl Into<String>,
        distance: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            distance: distance.into(),
            duration: duration.into(),
        }
    }
}

/// A complete, formatted route between two resolved points
///
/// Fields are private so the step list cannot change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    distance: String,
    duration: String,
    steps: Vec<RouteStep>,
    geometry: Option<LineString>,
    start: GeoPoint,
    end: GeoPoint,
    /// Raw encoded polyline, only present when the routing provider answered
    /// with the polyline geometry variant instead of GeoJSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    polyline: Option<String>,
}

impl RouteResult {
    /// Assemble a route result
    #[must_use]
    pub fn new(
        distance: String,
        duration: String,
        steps: Vec<RouteStep>,
        geometry: Option<LineString>,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Self {
        Self {
            distance,
            duration,
            steps,
            geometry,
            start,
            end,
            polyline: None,
        }
    }

    /// Attach the provider's encoded polyline
    #[must_use]
    pub fn with_polyline(mut self, polyline: Option<String>) -> Self {
        self.polyline = polyline;
        self
    }

    /// Total distance, human formatted
    #[must_use]
    pub fn distance(&self) -> &str {
        &self.distance
    }

    /// Total duration, human formatted
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Steps in route-traversal order
    #[must_use]
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Path geometry, if the provider returned one
    #[must_use]
    pub fn geometry(&self) -> Option<&LineString> {
        self.geometry.as_ref()
    }

    /// Resolved origin
    #[must_use]
    pub const fn start(&self) -> &GeoPoint {
        &self.start
    }

    /// Resolved destination
    #[must_use]
    pub const fn end(&self) -> &GeoPoint {
        &self.end
    }

    /// Encoded polyline for the provider variant that lacks GeoJSON
    #[must_use]
    pub fn polyline(&self) -> Option<&str> {
        self.polyline.as_deref()
    }
}
