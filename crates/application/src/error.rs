//! Application-level errors
//!
//! Every failure carries a kind tag set where it happens. User-facing text and
//! HTTP status classification are derived from that tag, never from the
//! message contents.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which upstream provider produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Address-to-coordinate lookup
    Geocoding,
    /// Path computation between coordinates
    Routing,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocoding => write!(f, "geocoding"),
            Self::Routing => write!(f, "routing"),
        }
    }
}

/// Classification of a network-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFailureKind {
    /// The attempt exceeded its deadline
    Timeout,
    /// The connection could not be established
    Connect,
    /// Any other transport-level failure
    Other,
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connect => write!(f, "connection failed"),
            Self::Other => write!(f, "transport error"),
        }
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The caller supplied missing or empty input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The geocoder returned no candidates for the query
    #[error("Location not found: {query}")]
    LocationNotFound {
        /// The address that could not be resolved
        query: String,
    },

    /// An upstream provider answered with a non-success HTTP status
    #[error("{provider} provider error: HTTP {status}")]
    Provider {
        /// Which provider failed
        provider: ProviderKind,
        /// HTTP status code returned
        status: u16,
    },

    /// The routing provider reported no viable path
    #[error("No route found: {message}")]
    NoRouteFound {
        /// Provider diagnostic, verbatim
        message: String,
    },

    /// Network failure that persisted through every retry
    #[error("Transport failure ({kind}): {message}")]
    Transport {
        /// What kind of network failure occurred
        kind: TransportFailureKind,
        /// Underlying error description
        message: String,
    },

    /// A provider payload could not be interpreted
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a location not found error
    pub fn location_not_found(query: impl Into<String>) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a no route error carrying the provider message
    pub fn no_route(message: impl Into<String>) -> Self {
        Self::NoRouteFound {
            message: message.into(),
        }
    }

    /// Create a transport failure error
    pub fn transport(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::LocationNotFound { .. } => "location_not_found",
            Self::Provider { .. } => "provider_error",
            Self::NoRouteFound { .. } => "no_route",
            Self::Transport {
                kind: TransportFailureKind::Timeout,
                ..
            } => "timeout",
            Self::Transport {
                kind: TransportFailureKind::Connect,
                ..
            } => "connection_failed",
            Self::Transport { .. } => "transport_error",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the caller is at fault (or the request cannot succeed as given)
    ///
    /// Geocoding misses count as client errors: the address was not resolvable.
    /// Routing provider HTTP failures count as client errors because the
    /// routing engine rejects unroutable coordinate pairs that way.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::LocationNotFound { .. }
                | Self::NoRouteFound { .. }
                | Self::Provider {
                    provider: ProviderKind::Routing,
                    ..
                }
        )
    }

    /// Message suitable for showing to an end user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::LocationNotFound { .. } => {
                "Could not find one or both locations. Please check the addresses.".to_string()
            },
            Self::Provider { provider, status } => {
                format!("The {provider} service returned an error (HTTP {status}).")
            },
            Self::NoRouteFound { message } => format!("Routing error: {message}"),
            Self::Transport { kind, .. } => match kind {
                TransportFailureKind::Timeout => "Request timed out. Please try again.".to_string(),
                TransportFailureKind::Connect => {
                    "Network connection failed. Please try again in a moment.".to_string()
                },
                TransportFailureKind::Other => {
                    "A network error occurred. Please try again.".to_string()
                },
            },
            Self::InvalidResponse(_) => {
                "Received an unexpected response from a map provider.".to_string()
            },
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}
