//! Retry limits, exponential backoff and timeout budget

use std::time::Duration;

use tokio::time::Instant;
use tutor_config::ForwarderConfig;

/// How hard the forwarder tries before falling back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per model, at least 1
    pub retries_per_model: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
    /// Cap on each individual outbound call
    pub request_timeout: Duration,
    /// Optional cap on the whole model sequence
    pub total_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries_per_model: 3,
            base_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            total_timeout: None,
        }
    }
}

impl From<&ForwarderConfig> for RetryPolicy {
    fn from(config: &ForwarderConfig) -> Self {
        Self {
            retries_per_model: config.retries_per_model.max(1),
            base_backoff: config.base_backoff,
            max_backoff: config.max_backoff,
            request_timeout: config.request_timeout,
            total_timeout: config.total_timeout,
        }
    }
}

impl RetryPolicy {
    /// Wait after the given 1-based attempt failed: `base * 2^attempt`, capped
    pub fn backoff(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_backoff.checked_mul(factor))
            .map_or(self.max_backoff, |delay| delay.min(self.max_backoff))
    }

    /// Deadline for the whole sequence when a total budget is configured
    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        self.total_timeout.map(|budget| start + budget)
    }

    /// Timeout for the next attempt, clipped to what is left of the budget
    ///
    /// `None` means the budget is spent and no further attempt may start.
    pub fn attempt_timeout(&self, deadline: Option<Instant>) -> Option<Duration> {
        match deadline {
            None => Some(self.request_timeout),
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                (!remaining.is_zero()).then(|| remaining.min(self.request_timeout))
            }
        }
    }
}
