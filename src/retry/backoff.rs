//! Backoff algorithms mapping a retry attempt number to a sleep duration.

use std::time::Duration;

/// Delay strategy between retry attempts. Implementations must be pure so
/// that attempt `n` always yields the same delay.
pub trait Backoff: Send + Sync {
    fn sleep_duration(&self, attempt: u32) -> Duration;
}

/// Exponential backoff: `factor^attempt * base_delay`, saturating.
///
/// Defaults give 300ms, 900ms, 2700ms, 8100ms for attempts 0..=3. No jitter.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    pub base_delay: Duration,
    pub factor: u32,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(300),
            factor: 3,
        }
    }
}

impl Backoff for ExponentialBackoff {
    fn sleep_duration(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(self.factor.saturating_pow(attempt))
    }
}

/// Constant delay between attempts (useful in tests and tight polls).
#[derive(Debug, Clone, Copy)]
pub struct FixedBackoff(pub Duration);

impl Backoff for FixedBackoff {
    fn sleep_duration(&self, _attempt: u32) -> Duration {
        self.0
    }
}
