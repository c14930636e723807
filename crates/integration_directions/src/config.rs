//! Routing service configuration

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::DirectionsError;

/// Geometry encoding requested from the routing engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    /// GeoJSON `LineString` with `[lon, lat]` positions
    #[default]
    GeoJson,
    /// Encoded polyline, precision 5
    Polyline,
    /// Encoded polyline, precision 6
    Polyline6,
}

impl GeometryFormat {
    /// Value of the `geometries` query parameter
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Polyline => "polyline",
            Self::Polyline6 => "polyline6",
        }
    }

    /// Coordinate precision of the encoded variants
    #[must_use]
    pub const fn precision(self) -> Option<u32> {
        match self {
            Self::GeoJson => None,
            Self::Polyline => Some(5),
            Self::Polyline6 => Some(6),
        }
    }
}

/// Configuration for the OSRM route service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL for the OSRM HTTP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Routing profile (`driving`, `cycling`, `foot`)
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Geometry encoding of the returned route
    #[serde(default)]
    pub geometries: GeometryFormat,

    /// Preferred language for road names and instructions
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_profile() -> String {
    "driving".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            geometries: GeometryFormat::default(),
            language: default_language(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration pointing at a local test server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        Url::parse(&self.base_url).map_err(|e| format!("base_url is not a valid URL: {e}"))?;

        if self.profile.is_empty() {
            return Err("profile must not be empty".to_string());
        }

        if self.profile.contains('/') {
            return Err("profile must be a single path segment".to_string());
        }

        Ok(())
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap, DirectionsError> {
        let mut headers = HeaderMap::new();
        if !self.language.is_empty() {
            let value = HeaderValue::from_str(&self.language).map_err(|e| {
                DirectionsError::ConfigurationError(format!("invalid header value: {e}"))
            })?;
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Ok(headers)
    }
}
