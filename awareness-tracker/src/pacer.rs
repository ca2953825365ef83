//! Minimum spacing between API calls.

use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Default minimum delay between two API calls.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Enforces a minimum delay between successive API calls.
///
/// The first call goes out immediately; each later one waits until `delay`
/// has passed since the previous call started.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    delay: Duration,
    last_call: Option<Instant>,
}

impl RequestPacer {
    /// Creates a pacer with the given minimum delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: None,
        }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits until the next call may be issued, then marks it as issued.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                let remaining = self.delay - elapsed;
                debug!(wait_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX), "Pacing request");
                sleep(remaining).await;
            }
        }
        self.last_call = Some(Instant::now());
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}
