//! Directions handler

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use domain::RouteResult;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Directions request body
///
/// Missing fields deserialize as empty strings and are rejected by the
/// service with the same error as blank ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionsRequest {
    /// Free-text start address
    #[serde(default)]
    pub source: String,
    /// Free-text end address
    #[serde(default)]
    pub destination: String,
}

/// Plan a driving route between two addresses
#[instrument(skip(state, payload))]
pub async fn directions(
    State(state): State<AppState>,
    payload: Result<Json<DirectionsRequest>, JsonRejection>,
) -> Result<Json<RouteResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected directions request body");
        ApiError::from(rejection)
    })?;

    match state
        .directions
        .plan(&request.source, &request.destination)
        .await
    {
        Ok(route) => Ok(Json(route)),
        Err(err) => {
            if err.is_client_error() {
                warn!(code = err.code(), error = %err, "Directions request failed");
            } else {
                error!(code = err.code(), error = %err, "Directions request failed");
            }
            Err(err.into())
        },
    }
}
