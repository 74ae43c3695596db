//! # Retry Policy
//!
//! The single retry/backoff component shared by every outbound request. Each
//! attempt is supplied as a closure so the policy never needs to know what is
//! being requested.
//!
//! Outcomes per attempt:
//!
//! | Outcome                 | Action                                                       |
//! |-------------------------|--------------------------------------------------------------|
//! | 2xx / other non-success | returned immediately                                         |
//! | 429                     | wait `Retry-After` seconds (or linear backoff), retry        |
//! | 500 / 503               | linear backoff and retry; last attempt returns the response  |
//! | network failure/timeout | linear backoff and retry; last attempt propagates the error  |
//!
//! Every branch is bounded by `max_retries`. A run that is still rate limited
//! on its last attempt fails with [`TriageError::MaxRetriesExceeded`].

use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::client::transport::{ApiResponse, TransportError};
use crate::constants::status;
use crate::error::{Result, TriageError};

/// Classification of a single attempt's HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    RateLimited,
    TransientServerError,
    Fatal,
}

impl AttemptOutcome {
    pub fn classify(status_code: u16) -> Self {
        match status_code {
            200..=299 => AttemptOutcome::Success,
            status::TOO_MANY_REQUESTS => AttemptOutcome::RateLimited,
            code if status::TRANSIENT_SERVER_ERRORS.contains(&code) => {
                AttemptOutcome::TransientServerError
            }
            _ => AttemptOutcome::Fatal,
        }
    }
}

/// Bounded retry with linear backoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_delay: Duration,
    attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            attempt_timeout: None,
        }
    }

    /// Treat an attempt that runs longer than `timeout` as a network failure
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Linear backoff: `initial_delay * (attempt_index + 1)`
    pub fn backoff_delay(&self, attempt_index: u32) -> Duration {
        self.initial_delay.saturating_mul(attempt_index.saturating_add(1))
    }

    /// Wait before retrying a rate-limited attempt
    ///
    /// A `Retry-After` value is read by its leading whole seconds, so `"2.5"`
    /// and `"2s"` both wait 2 s. A value without leading digits falls back to
    /// the linear backoff.
    pub fn rate_limit_delay(&self, retry_after: Option<&str>, attempt_index: u32) -> Duration {
        retry_after
            .and_then(leading_seconds)
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.backoff_delay(attempt_index))
    }

    /// Run `attempt` until it yields a terminal response or the budget is spent
    ///
    /// `operation` labels log lines and the exhaustion error.
    pub async fn execute<F, Fut>(&self, operation: &str, mut attempt: F) -> Result<ApiResponse>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<ApiResponse, TransportError>>,
    {
        for attempt_index in 0..self.max_retries {
            let attempt_number = attempt_index + 1;
            let is_last = attempt_number == self.max_retries;

            match self.run_attempt(&mut attempt).await {
                Ok(response) => match AttemptOutcome::classify(response.status) {
                    AttemptOutcome::RateLimited => {
                        if is_last {
                            warn!(
                                operation = %operation,
                                attempt = attempt_number,
                                max_retries = self.max_retries,
                                "Rate limited on final attempt"
                            );
                            break;
                        }
                        let wait =
                            self.rate_limit_delay(response.retry_after.as_deref(), attempt_index);
                        warn!(
                            operation = %operation,
                            wait_ms = wait.as_millis() as u64,
                            attempt = attempt_number,
                            max_retries = self.max_retries,
                            "Rate limited, waiting before retry"
                        );
                        tokio::time::sleep(wait).await;
                    }
                    AttemptOutcome::TransientServerError if !is_last => {
                        let wait = self.backoff_delay(attempt_index);
                        warn!(
                            operation = %operation,
                            status = response.status,
                            wait_ms = wait.as_millis() as u64,
                            attempt = attempt_number,
                            max_retries = self.max_retries,
                            "Server error, will retry"
                        );
                        tokio::time::sleep(wait).await;
                    }
                    outcome => {
                        debug!(
                            operation = %operation,
                            status = response.status,
                            outcome = ?outcome,
                            attempt = attempt_number,
                            "Attempt finished"
                        );
                        return Ok(response);
                    }
                },
                Err(e) => {
                    if is_last {
                        error!(
                            operation = %operation,
                            error = %e,
                            attempts = attempt_number,
                            "Network error on final attempt"
                        );
                        return Err(TriageError::Transport(e));
                    }
                    let wait = self.backoff_delay(attempt_index);
                    warn!(
                        operation = %operation,
                        error = %e,
                        wait_ms = wait.as_millis() as u64,
                        attempt = attempt_number,
                        max_retries = self.max_retries,
                        "Network error, will retry"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }

        error!(
            operation = %operation,
            max_retries = self.max_retries,
            "Exhausted all retries"
        );
        Err(TriageError::MaxRetriesExceeded {
            operation: operation.to_string(),
            attempts: self.max_retries,
        })
    }

    async fn run_attempt<F, Fut>(
        &self,
        attempt: &mut F,
    ) -> std::result::Result<ApiResponse, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<ApiResponse, TransportError>>,
    {
        match self.attempt_timeout {
            Some(timeout) => tokio::time::timeout(timeout, attempt())
                .await
                .unwrap_or(Err(TransportError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })),
            None => attempt().await,
        }
    }
}

fn leading_seconds(value: &str) -> Option<u64> {
    let value = value.trim();
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    value[..digits].parse().ok()
}
