//! Resilient HTTP fetching
//!
//! Wraps a [`reqwest::Client`] so that each GET attempt is bounded by a
//! deadline and transport failures are retried with backoff. Responses are
//! returned as received, whatever their status.

use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use crate::error::{DirectionsError, TransportKind};
use crate::retry::{RetryConfig, retry};

/// HTTP GET with per-attempt deadline and retry on transport failure
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    client: Client,
    policy: RetryConfig,
}

impl ResilientFetcher {
    /// Create a fetcher around an existing client
    #[must_use]
    pub const fn new(client: Client, policy: RetryConfig) -> Self {
        Self { client, policy }
    }

    /// Create a fetcher with a default client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_policy(policy: RetryConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .build()
            .map_err(|e| DirectionsError::ConfigurationError(e.to_string()))?;
        Ok(Self::new(client, policy))
    }

    /// The retry policy in effect
    #[must_use]
    pub const fn policy(&self) -> &RetryConfig {
        &self.policy
    }

    /// Issue a GET request, retrying transport failures
    ///
    /// # Errors
    ///
    /// Returns `DirectionsError::Transport` carrying the last failure once
    /// every attempt failed without a response.
    #[instrument(skip(self, query, headers))]
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &HeaderMap,
    ) -> Result<Response, DirectionsError> {
        let deadline = self.policy.attempt_timeout();

        let response = retry(&self.policy, || {
            let request = self
                .client
                .get(url)
                .query(query)
                .headers(headers.clone())
                .send();

            async move {
                match tokio::time::timeout(deadline, request).await {
                    Ok(Ok(response)) => Ok(response),
                    Ok(Err(e)) => Err(DirectionsError::from_reqwest(&e)),
                    Err(_) => Err(DirectionsError::transport(
                        TransportKind::Timeout,
                        format!("no response within {}ms", deadline.as_millis()),
                    )),
                }
            }
        })
        .await?;

        debug!(status = response.status().as_u16(), "Received response");
        Ok(response)
    }
}
