//! API error handling
//!
//! Maps application failures to a status code and a `{ error, code }` body.
//! The message is always the user-facing phrasing derived from the error
//! kind; provider diagnostics stay in the logs.

use application::ApplicationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request cannot succeed as given
    #[error("Bad request ({code}): {message}")]
    BadRequest {
        /// Machine-readable code
        code: &'static str,
        /// User-facing message
        message: String,
    },

    /// A provider or the network failed
    #[error("Upstream failure ({code}): {message}")]
    Upstream {
        /// Machine-readable code
        code: &'static str,
        /// User-facing message
        message: String,
    },

    /// Unexpected failure inside the service
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest { code, message } | Self::Upstream { code, message } => {
                ErrorResponse {
                    error: message,
                    code: code.to_string(),
                }
            },
            Self::Internal(_) => ErrorResponse {
                error: "An internal error occurred".to_string(),
                code: "internal_error".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let code = err.code();
        let message = err.user_message();
        match err {
            ApplicationError::Internal(msg) => Self::Internal(msg),
            err if err.is_client_error() => Self::BadRequest { code, message },
            _ => Self::Upstream { code, message },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected a JSON body with Content-Type: application/json".to_string()
            },
            other => format!("Invalid request body: {}", other.body_text()),
        };
        Self::BadRequest {
            code: "invalid_body",
            message,
        }
    }
}
