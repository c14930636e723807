//! Nominatim geocoding client
//!
//! Converts free-form address strings to geographic coordinates using
//! the [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//! Only the top-ranked candidate is used.

use async_trait::async_trait;
use domain::GeoPoint;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::error::DirectionsError;
use crate::fetch::ResilientFetcher;
use crate::retry::RetryConfig;

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `User-Agent` sent with every request (required by the usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional `Referer` identifying the calling application
    #[serde(default)]
    pub referer: Option<String>,

    /// Preferred language for place names
    #[serde(default = "default_language")]
    pub language: String,

    /// Comma-separated country codes to restrict results (empty = worldwide)
    #[serde(default)]
    pub country_filter: String,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "Wayfinder/0.1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            referer: None,
            language: default_language(),
            country_filter: String::new(),
        }
    }
}

impl NominatimConfig {
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

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }

    fn headers(&self) -> Result<HeaderMap, DirectionsError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&self.user_agent)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&self.language)?);
        if let Some(referer) = self.referer.as_deref().filter(|r| !r.is_empty()) {
            headers.insert(REFERER, header_value(referer)?);
        }
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, DirectionsError> {
    HeaderValue::from_str(value)
        .map_err(|e| DirectionsError::ConfigurationError(format!("invalid header value: {e}")))
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to geographic coordinates
    async fn geocode(&self, address: &str) -> Result<GeoPoint, DirectionsError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    fetcher: ResilientFetcher,
    config: NominatimConfig,
    headers: HeaderMap,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized or a
    /// configured header value is not valid.
    pub fn new(config: &NominatimConfig, policy: &RetryConfig) -> Result<Self, DirectionsError> {
        Ok(Self {
            fetcher: ResilientFetcher::with_policy(policy.clone())?,
            headers: config.headers()?,
            config: config.clone(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoPoint, DirectionsError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(DirectionsError::AddressNotFound(
                "Address must not be empty".to_string(),
            ));
        }

        let mut params = vec![
            ("format", "json".to_string()),
            ("q", address.to_string()),
            ("limit", "1".to_string()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%address, "Geocoding address");

        let response = self
            .fetcher
            .get(&self.search_url(), &params, &self.headers)
            .await?;

        if !response.status().is_success() {
            return Err(DirectionsError::RequestFailed {
                status: response.status().as_u16(),
            });
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| DirectionsError::AddressNotFound(address.to_string()))?;

        let point = result.into_point(address)?;
        debug!(%address, lat = point.lat(), lon = point.lon(), "Geocoded address");
        Ok(point)
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl NominatimResult {
    fn into_point(self, query: &str) -> Result<GeoPoint, DirectionsError> {
        let lat: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| DirectionsError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| DirectionsError::ParseError("Invalid longitude".to_string()))?;

        let label = self
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| query.to_string());

        GeoPoint::new(lat, lon, label).map_err(|e| DirectionsError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_config_default() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.language, "en");
        assert!(config.country_filter.is_empty());
        assert!(config.referer.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_user_agent() {
        let config = NominatimConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_headers_include_referer_when_set() {
        let config = NominatimConfig {
            referer: Some("https://wayfinder.example".to_string()),
            ..Default::default()
        };
        let headers = config.headers().unwrap();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "Wayfinder/0.1");
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en");
        assert_eq!(headers.get(REFERER).unwrap(), "https://wayfinder.example");

        let headers = NominatimConfig::default().headers().unwrap();
        assert!(headers.get(REFERER).is_none());
    }

    #[test]
    fn test_invalid_header_value_is_config_error() {
        let config = NominatimConfig {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.headers(),
            Err(DirectionsError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_nominatim_result_parsing() {
        let json = r#"[{"lat": "52.5170365", "lon": "13.3888599", "display_name": "Berlin, Deutschland"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        let point = results.into_iter().next().unwrap().into_point("Berlin").unwrap();
        assert!((point.lat() - 52.517_036_5).abs() < 1e-9);
        assert!((point.lon() - 13.388_859_9).abs() < 1e-9);
        assert_eq!(point.label(), "Berlin, Deutschland");
    }

    #[test]
    fn test_missing_display_name_falls_back_to_query() {
        let result = NominatimResult {
            lat: "1.0".to_string(),
            lon: "2.0".to_string(),
            display_name: None,
        };
        assert_eq!(result.into_point("Somewhere").unwrap().label(), "Somewhere");
    }

    #[test]
    fn test_unparseable_coordinates() {
        let result = NominatimResult {
            lat: "north".to_string(),
            lon: "2.0".to_string(),
            display_name: None,
        };
        assert!(matches!(
            result.into_point("x"),
            Err(DirectionsError::ParseError(_))
        ));

        let result = NominatimResult {
            lat: "95.0".to_string(),
            lon: "2.0".to_string(),
            display_name: None,
        };
        assert!(matches!(
            result.into_point("x"),
            Err(DirectionsError::ParseError(_))
        ));
    }
}
