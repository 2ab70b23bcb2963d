//! iModel operations: single-entity fetch and initialization readiness.
//!
//! A freshly created iModel is usable only after its baseline file has been
//! initialized server-side; `wait_until_initialized` polls for that through
//! the condition waiter.

use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::error_model::{ApiError, ApiErrorCode};
use crate::http::{HttpClient, HttpRequest};
use crate::readiness::{wait_for_condition, WaitOptions};
use crate::retry::{send_with_retry, RetryPolicy};

/// Baseline initialization state of an iModel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IModelState {
    Initialized,
    NotInitialized,
    Failed,
}

/// One iModel as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IModel {
    pub id: String,
    pub display_name: String,
    pub state: IModelState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IModelEnvelope {
    i_model: IModel,
}

fn imodel_url(base_url: &Url, imodel_id: &str) -> Result<Url, ApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::new(ApiErrorCode::InvalidValue, "base URL cannot hold path segments"))?
        .pop_if_empty()
        .push(imodel_id);
    Ok(url)
}

/// Fetches one iModel by id.
pub async fn get(
    http: &dyn HttpClient,
    policy: &RetryPolicy,
    base_url: &Url,
    imodel_id: &str,
) -> Result<IModel, ApiError> {
    let url = imodel_url(base_url, imodel_id)?;
    let response = send_with_retry(http, policy, HttpRequest::get(url.as_str())).await?;
    let envelope: IModelEnvelope = serde_json::from_str(&response.body).map_err(|error| {
        ApiError::new(ApiErrorCode::Unknown, format!("unexpected iModel body: {error}"))
    })?;
    Ok(envelope.i_model)
}

/// Polls the iModel until its baseline initialization completes.
///
/// A timeout surfaces `IModelInitializationTimedOut`; a `Failed` state
/// surfaces `BaselineFileInitializationFailed`; a failing poll propagates
/// its own normalized error.
pub async fn wait_until_initialized(
    http: Arc<dyn HttpClient>,
    policy: Arc<RetryPolicy>,
    base_url: &Url,
    imodel_id: &str,
    options: WaitOptions,
) -> Result<(), ApiError> {
    let base_url = base_url.clone();
    let id = imodel_id.to_string();
    wait_for_condition(
        move || {
            let http = Arc::clone(&http);
            let policy = Arc::clone(&policy);
            let base_url = base_url.clone();
            let id = id.clone();
            async move {
                let imodel = get(http.as_ref(), &policy, &base_url, &id).await?;
                match imodel.state {
                    IModelState::Initialized => Ok(true),
                    IModelState::NotInitialized => Ok(false),
                    IModelState::Failed => Err(ApiError::new(
                        ApiErrorCode::BaselineFileInitializationFailed,
                        format!("baseline file initialization failed for iModel {id}"),
                    )),
                }
            }
        },
        || {
            ApiError::new(
                ApiErrorCode::IModelInitializationTimedOut,
                format!("iModel {imodel_id} was not initialized within the wait timeout"),
            )
        },
        options,
    )
    .await
}
