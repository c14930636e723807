//! GeoJSON LineString geometry
//!
//! Positions follow the GeoJSON convention of `[longitude, latitude]`.
//! Nothing in this crate reorders them; callers that need latitude first
//! must go through [`LineString::lat_lon_pairs`].

use serde::{Deserialize, Serialize};

/// A `[longitude, latitude]` pair
pub type Position = [f64; 2];

/// GeoJSON geometry type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeometryType {
    #[default]
    LineString,
}

/// Ordered path geometry for map rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    kind: GeometryType,
    coordinates: Vec<Position>,
}

impl LineString {
    /// Create a line string from `[longitude, latitude]` positions
    #[must_use]
    pub const fn new(coordinates: Vec<Position>) -> Self {
        Self {
            kind: GeometryType::LineString,
            coordinates,
        }
    }

    /// Positions in GeoJSON order (`[lon, lat]`)
    #[must_use]
    pub fn coordinates(&self) -> &[Position] {
        &self.coordinates
    }

    /// Number of positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the line has no positions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Positions converted to `[lat, lon]`, the order most map widgets expect
    #[must_use]
    pub fn lat_lon_pairs(&self) -> Vec<[f64; 2]> {
        self.coordinates.iter().map(|[lon, lat]| [*lat, *lon]).collect()
    }
}
