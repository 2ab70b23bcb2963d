//! Retry loop: send a request until success or the policy says stop.

use crate::error_model::{self, ApiError, RawFailure};
use crate::http::{HttpClient, HttpRequest, HttpResponse};

use super::policy::RetryPolicy;

/// Sends `request` through `client`, retrying per `policy`.
///
/// HTTP error statuses and transport failures go through the same decision:
/// while retries remain and the policy allows, sleep the backoff delay and
/// re-send; otherwise normalize the failure and return it. The sleep is an
/// async suspension, so other in-flight work keeps running.
pub async fn send_with_retry(
    client: &dyn HttpClient,
    policy: &RetryPolicy,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let mut retries_invoked = 0u32;
    loop {
        let failure = match client.send(request.clone()).await {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => RawFailure::HttpError {
                status: response.status,
                body: response.body,
            },
            Err(transport) => RawFailure::TransportError(transport),
        };

        if retries_invoked < policy.max_retries && policy.should_retry(&failure) {
            let delay = policy.sleep_duration(retries_invoked);
            tracing::debug!(
                url = %request.url,
                retries_invoked,
                delay_ms = delay.as_millis() as u64,
                "request failed, retrying after backoff"
            );
            tokio::time::sleep(delay).await;
            retries_invoked += 1;
            continue;
        }

        return Err(error_model::parse(failure));
    }
}
