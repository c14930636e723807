//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A resolved location: coordinates plus the provider's display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    lat: f64,
    /// Longitude in degrees (-180 to 180)
    lon: f64,
    /// Human-readable label as returned by the geocoder
    label: String,
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite.
    pub fn new(lat: f64, lon: f64, label: impl Into<String>) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::invalid_coordinates(lat, lon));
        }
        Ok(Self {
            lat,
            lon,
            label: label.into(),
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Get the longitude
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Get the display label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Render as `lon,lat`, the coordinate order routing engines expect
    #[must_use]
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

/// Unchecked wire shape, validated through [`GeoPoint::new`]
#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lon: f64,
    label: String,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = DomainError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon, raw.label)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.6}, {:.6})", self.label, self.lat, self.lon)
    }
}
