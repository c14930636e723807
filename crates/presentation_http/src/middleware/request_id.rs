//! Request ID middleware for HTTP request correlation
//!
//! Reuses a caller-supplied `X-Request-Id` when it is a short token,
//! otherwise generates a UUID v7. The id is stored in the request
//! extensions, recorded on the request span and echoed on the response.

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Longest caller-supplied id that is propagated as-is
const MAX_REQUEST_ID_LEN: usize = 64;

/// Layer that adds request ID handling to HTTP services
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    /// Create a new request ID layer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that extracts or generates a request ID for each request
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let request_id = RequestId::from_header(request.headers().get(REQUEST_ID_HEADER));

        request.extensions_mut().insert(request_id.clone());

        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            uri = %request.uri().path(),
        );

        let mut inner = self.inner.clone();

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Request ID propagated from the caller or generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh time-ordered id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Use the header value when acceptable, otherwise generate one
    #[must_use]
    pub fn from_header(value: Option<&HeaderValue>) -> Self {
        value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| is_acceptable(s))
            .map_or_else(Self::generate, |s| Self(s.to_string()))
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_acceptable(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= MAX_REQUEST_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_layer_new() {
        let layer = RequestIdLayer::new();
        assert!(std::mem::size_of_val(&layer) == 0);
    }

    #[test]
    fn caller_id_is_propagated() {
        let header = HeaderValue::from_static("trace-abc_123.4");
        assert_eq!(
            RequestId::from_header(Some(&header)).as_str(),
            "trace-abc_123.4"
        );
    }

    #[test]
    fn missing_id_generates_uuid() {
        let id = RequestId::from_header(None);
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn unacceptable_ids_are_replaced() {
        let spaced = HeaderValue::from_static("has spaces inside");
        assert_ne!(
            RequestId::from_header(Some(&spaced)).as_str(),
            "has spaces inside"
        );

        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        let long_header = HeaderValue::from_str(&long).unwrap();
        assert_ne!(RequestId::from_header(Some(&long_header)).as_str(), long);

        let empty = HeaderValue::from_static("");
        assert!(!RequestId::from_header(Some(&empty)).as_str().is_empty());
    }

    #[test]
    fn request_id_display() {
        let id = RequestId("abc".to_string());
        assert_eq!(id.to_string(), "abc");
    }
}
