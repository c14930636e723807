//! Directions error types

use std::fmt;

use thiserror::Error;

/// Classification of a transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The attempt did not complete before its deadline
    Timeout,
    /// The connection could not be established
    Connect,
    /// Anything else that went wrong before a response arrived
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connect => write!(f, "connect"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Errors that can occur while geocoding or routing
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// No HTTP response was obtained
    #[error("Transport failure ({kind}): {message}")]
    Transport {
        /// What kind of network failure occurred
        kind: TransportKind,
        /// Underlying error description
        message: String,
    },

    /// The provider answered with a non-success status
    #[error("Request failed: HTTP {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse a provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// The routing engine reported no usable route
    #[error("No route found ({code}): {message}")]
    NoRoute {
        /// Provider status code, e.g. `NoRoute` or `InvalidQuery`
        code: String,
        /// Provider message or a fallback
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl DirectionsError {
    /// Create a transport error
    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Classify a reqwest failure that happened before a response arrived
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };
        Self::transport(kind, err.to_string())
    }

    /// Returns true if this error is retryable
    ///
    /// Only transport failures qualify; a response of any status is final.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
