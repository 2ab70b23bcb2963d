//! Retry policy: whether a failure is worth retrying and how long to wait.

use std::time::Duration;

use super::backoff::{Backoff, ExponentialBackoff};
use super::classify::{classify, FailureKind};
use crate::config::RetryConfig;
use crate::error_model::RawFailure;

/// Decides retries for the HTTP execution wrapper.
///
/// `max_retries` bounds retry attempts (the first try is not counted); the
/// execution loop enforces the ceiling. The predicate itself only looks at
/// the failure shape.
pub struct RetryPolicy {
    pub max_retries: u32,
    backoff: Box<dyn Backoff>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Box::new(ExponentialBackoff::default()),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: impl Backoff + 'static) -> Self {
        Self {
            max_retries,
            backoff: Box::new(backoff),
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            ExponentialBackoff {
                base_delay: config.base_delay(),
                factor: config.factor,
            },
        )
    }

    /// True when retrying can plausibly change the outcome: any failure that
    /// is not a well-formed HTTP error response, or a server-side (5xx) one.
    pub fn should_retry(&self, failure: &RawFailure) -> bool {
        match classify(failure) {
            FailureKind::ClientError(_) => false,
            FailureKind::ServerError(_) | FailureKind::Transport | FailureKind::Timeout => true,
        }
    }

    /// Delay to sleep before retry number `retries_invoked + 1`.
    pub fn sleep_duration(&self, retries_invoked: u32) -> Duration {
        self.backoff.sleep_duration(retries_invoked)
    }
}
