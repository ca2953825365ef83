//! Retry policy for transport failures.
//!
//! Only failures where no response arrived (connect errors, timeouts) are
//! retried. An HTTP status is an answer from the API and is handed to the
//! caller unchanged.

use std::time::Duration;

/// Policy for retrying requests that never reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with exponential backoff starting at one second.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self::new(1)
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Returns true if another attempt is allowed after `attempt` failures
    /// with this error.
    pub fn should_retry(&self, attempt: u32, error: &reqwest::Error) -> bool {
        attempt < self.max_attempts && (error.is_connect() || error.is_timeout())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
