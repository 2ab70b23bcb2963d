//! Poll an asynchronous condition until it holds or a timeout budget runs out.
//!
//! Used for readiness checks such as iModel baseline initialization. The
//! caller supplies the error to surface on timeout, so the failure carries a
//! condition-specific code instead of a generic one.

use std::future::Future;
use std::time::Duration;

use crate::config::WaitConfig;
use crate::error_model::ApiError;

/// Poll interval and total timeout for one wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(300),
        }
    }
}

impl From<&WaitConfig> for WaitOptions {
    fn from(config: &WaitConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            timeout: config.timeout(),
        }
    }
}

/// Polls `condition_to_satisfy` every `poll_interval` until it resolves true.
///
/// The attempt budget is `ceil(timeout / poll_interval)` (at least one);
/// once exhausted, the error produced by `timeout_error_factory` is
/// returned. A predicate error propagates immediately; a failing poll is a
/// real failure, not a pending condition.
pub async fn wait_for_condition<C, Fut, E>(
    mut condition_to_satisfy: C,
    timeout_error_factory: E,
    options: WaitOptions,
) -> Result<(), ApiError>
where
    C: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ApiError>>,
    E: FnOnce() -> ApiError,
{
    let interval_ms = options.poll_interval.as_millis().max(1);
    let attempts = options.timeout.as_millis().div_ceil(interval_ms).max(1);
    for _ in 0..attempts {
        if condition_to_satisfy().await? {
            return Ok(());
        }
        tokio::time::sleep(options.poll_interval).await;
    }
    Err(timeout_error_factory())
}
