//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub geocoding: ProviderInfo,
    pub routing: ProviderInfo,
}

/// Configured provider endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Readiness check - is the server ready to accept requests?
///
/// The pipeline holds no connections, so readiness reports the configured
/// providers without probing them.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        ready: true,
        geocoding: ProviderInfo {
            base_url: state.config.geocoding.base_url.clone(),
            profile: None,
        },
        routing: ProviderInfo {
            base_url: state.config.routing.base_url.clone(),
            profile: Some(state.config.routing.profile.clone()),
        },
    })
}
