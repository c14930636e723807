//! Retry with exponential backoff
//!
//! Every provider call goes through [`with_retry`]. An attempt that fails
//! with a retryable error is repeated after a delay that doubles each time
//! and is capped; any other outcome ends the loop immediately.
//!
//! With the defaults a call makes at most 3 attempts, waiting 1s before the
//! second and 2s before the third.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_directions::{RetryConfig, with_retry};
//!
//! let config = RetryConfig::default();
//! let result = with_retry(&config, || async {
//!     client.get(url).send().await
//! }).await;
//! ```

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::DirectionsError;

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts including the first one (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after the first failed attempt in milliseconds (default: 1000ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for a single delay in milliseconds (default: 5000ms)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Deadline for a single attempt in milliseconds (default: 10000ms)
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_ms: u64,

    /// Randomize delays to spread out simultaneous retries (default: false)
    #[serde(default)]
    pub jitter_enabled: bool,

    /// Maximum jitter factor (0.0 to 1.0, default: 0.1 = 10%)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_delay() -> u64 {
    1000
}

const fn default_max_delay() -> u64 {
    5000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_attempt_timeout() -> u64 {
    10_000
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            attempt_timeout_ms: default_attempt_timeout(),
            jitter_enabled: false,
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration with custom backoff parameters
    #[must_use]
    pub const fn new(
        max_attempts: u32,
        initial_delay_ms: u64,
        max_delay_ms: u64,
        attempt_timeout_ms: u64,
    ) -> Self {
        Self {
            max_attempts,
            initial_delay_ms,
            max_delay_ms,
            multiplier: 2.0,
            attempt_timeout_ms,
            jitter_enabled: false,
            jitter_factor: 0.1,
        }
    }

    /// Short delays and deadlines for tests against local servers
    #[must_use]
    pub const fn for_testing() -> Self {
        Self::new(3, 10, 50, 500)
    }

    /// Enable jitter with the given factor
    #[must_use]
    pub const fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter_enabled = true;
        self.jitter_factor = factor;
        self
    }

    /// Deadline applied to each individual attempt
    #[must_use]
    pub const fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// Calculate the delay after a given failed attempt (0-indexed)
    ///
    /// `delay = initial_delay * multiplier^attempt`, capped at `max_delay`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = (self.initial_delay_ms as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        let final_delay = if self.jitter_enabled && self.jitter_factor > 0.0 {
            let jitter_range = capped_delay * self.jitter_factor;
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped_delay + jitter).clamp(0.0, self.max_delay_ms as f64)
        } else {
            capped_delay
        };

        // Safe: final_delay is capped and non-negative
        Duration::from_millis(final_delay as u64)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }

        if self.attempt_timeout_ms == 0 {
            return Err("attempt_timeout_ms must be greater than 0".to_string());
        }

        if self.multiplier < 1.0 {
            return Err("multiplier must be at least 1.0".to_string());
        }

        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err("jitter_factor must be between 0.0 and 1.0".to_string());
        }

        Ok(())
    }
}

/// Trait for errors that can be checked for retryability
pub trait Retryable {
    /// Returns true if this error is retryable
    fn is_retryable(&self) -> bool;
}

impl Retryable for DirectionsError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Retry result containing either success or the last error
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The result of the operation
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries, 2 = one retry, etc.)
    pub attempts: u32,
    /// Total time spent including retries
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    /// Check if the operation succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert to standard Result, discarding metadata
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Execute an async operation with retry logic
///
/// The operation is invoked at most `max_attempts` times (at least once).
/// Non-retryable errors and successes are returned without delay; the last
/// retryable error is returned once attempts are exhausted.
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = Instant::now();
    let max_attempts = config.max_attempts.max(1);
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        attempts = attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Operation succeeded after retries"
                    );
                }
                return RetryResult {
                    result: Ok(value),
                    attempts,
                    total_duration: start.elapsed(),
                };
            },
            Err(err) => {
                if !err.is_retryable() {
                    debug!(
                        attempts = attempts,
                        error = %err,
                        "Operation failed with non-retryable error"
                    );
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                if attempts >= max_attempts {
                    warn!(
                        attempts = attempts,
                        error = %err,
                        "Operation failed after max attempts"
                    );
                    return RetryResult {
                        result: Err(err),
                        attempts,
                        total_duration: start.elapsed(),
                    };
                }

                let delay = config.delay_for_attempt(attempts - 1);
                warn!(
                    attempt = attempts,
                    max_attempts = max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, retrying"
                );

                tokio::time::sleep(delay).await;
            },
        }
    }
}

/// Execute an async operation with retry logic, returning only the Result
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry(config, operation).await.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportKind;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    fn transient() -> DirectionsError {
        DirectionsError::transport(TransportKind::Connect, "connection refused")
    }

    #[test]
    fn config_default_values() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 5000);
        assert_eq!(config.attempt_timeout_ms, 10_000);
        assert!((config.multiplier - 2.0).abs() < f64::EPSILON);
        assert!(!config.jitter_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn delay_doubles_and_caps() {
        let config = RetryConfig::default();

        assert_eq!(config.delay_for_attempt(0).as_millis(), 1000);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 2000);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 4000);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 5000);
        assert_eq!(config.delay_for_attempt(10).as_millis(), 5000);
    }

    #[test]
    fn jittered_delay_stays_within_bounds() {
        let config = RetryConfig::default().with_jitter(0.1);
        for _ in 0..50 {
            let delay = config.delay_for_attempt(0).as_millis();
            assert!((900..=1100).contains(&delay), "delay {delay} out of range");
            assert!(config.delay_for_attempt(5).as_millis() <= 5000);
        }
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let config = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserialization_fills_defaults() {
        let json = r#"{"max_attempts":5}"#;
        let config: RetryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.attempt_timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn with_retry_succeeds_first_try() {
        let config = RetryConfig::for_testing();
        let call_count = Arc::new(AtomicU32::new(0));

        let result = with_retry(&config, || {
            let count = Arc::clone(&call_count);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok::<_, DirectionsError>(42)
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(result.attempts, 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fails_twice_then_succeeds_with_backoff() {
        let config = RetryConfig::default();
        let calls: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

        let result = with_retry(&config, || {
            let calls = Arc::clone(&calls);
            async move {
                let attempt = {
                    let mut calls = calls.lock().unwrap();
                    calls.push(Instant::now());
                    calls.len()
                };
                if attempt < 3 {
                    Err(transient())
                } else {
                    Ok("route")
                }
            }
        })
        .await;

        assert_eq!(result.attempts, 3);
        assert_eq!(result.result.unwrap(), "route");

        let calls = calls.lock().unwrap();
        let first_gap = calls[1] - calls[0];
        let second_gap = calls[2] - calls[1];
        assert!(first_gap >= Duration::from_secs(1) && first_gap < Duration::from_secs(2));
        assert!(second_gap >= Duration::from_secs(1) && second_gap <= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_makes_exactly_max_attempts() {
        let config = RetryConfig::default();
        let call_count = Arc::new(AtomicU32::new(0));

        let result = with_retry(&config, || {
            let count = Arc::clone(&call_count);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(transient())
            }
        })
        .await;

        assert_eq!(result.attempts, 3);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result.result,
            Err(DirectionsError::Transport {
                kind: TransportKind::Connect,
                ..
            })
        ));
        // 1s + 2s of backoff, no wait after the final attempt
        assert!(result.total_duration >= Duration::from_secs(3));
        assert!(result.total_duration < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn non_retryable_error_returns_immediately() {
        let config = RetryConfig::default();
        let call_count = Arc::new(AtomicU32::new(0));

        let result = with_retry(&config, || {
            let count = Arc::clone(&call_count);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(DirectionsError::RequestFailed { status: 500 })
            }
        })
        .await;

        assert_eq!(result.attempts, 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_max_attempts_still_runs_once() {
        let config = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };

        let result = retry(&config, || async { Err::<(), _>(transient()) }).await;
        assert!(result.is_err());
    }
}
