//! Changeset operations: paged listing and bulk file download.
//!
//! Representative of how per-entity operations use the shared mechanisms: a
//! list builds a page query over the HTTP layer and wraps it in an
//! `EntityIterator`; a bulk download schedules one transfer per file into
//! the bounded-parallelism queue.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::control::AbortSignal;
use crate::error_model::{ApiError, ApiErrorCode};
use crate::http::{HttpClient, HttpRequest};
use crate::paging::{EntityIterator, Page, PageFuture, PageQuery};
use crate::retry::{send_with_retry, RetryPolicy};
use crate::scheduler::ParallelTaskQueue;
use crate::transfer::{DownloadParams, FileTransfer, ProgressCallback, TransferError};

/// One changeset as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changeset {
    pub id: String,
    pub display_name: String,
    pub index: i64,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub file_size: u64,
    #[serde(default, rename = "_links")]
    pub links: ChangesetLinks,
}

/// Hypermedia links attached to a changeset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangesetLinks {
    #[serde(default)]
    pub download: Option<Link>,
}

/// One hypermedia link.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Deserialize)]
struct ChangesetPage {
    changesets: Vec<Changeset>,
    #[serde(default, rename = "_links")]
    links: PageLinks,
}

#[derive(Debug, Default, Deserialize)]
struct PageLinks {
    #[serde(default)]
    next: Option<Link>,
}

/// Lazily lists an iModel's changesets in ascending index order.
///
/// Nothing is fetched until the returned iterator is advanced; each page
/// fetch goes through the retry policy.
pub fn list(
    http: Arc<dyn HttpClient>,
    policy: Arc<RetryPolicy>,
    base_url: &Url,
    imodel_id: &str,
    page_size: Option<usize>,
) -> Result<EntityIterator<Changeset>, ApiError> {
    let mut url = changesets_url(base_url, imodel_id)?;
    if let Some(top) = page_size {
        url.query_pairs_mut().append_pair("$top", &top.to_string());
    }
    Ok(EntityIterator::new(page_query(http, policy, url.into())))
}

fn changesets_url(base_url: &Url, imodel_id: &str) -> Result<Url, ApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::new(ApiErrorCode::InvalidValue, "base URL cannot hold path segments"))?
        .pop_if_empty()
        .push(imodel_id)
        .push("changesets");
    Ok(url)
}

/// Capability fetching one changeset page; the fetched page carries the
/// capability for the page after it, taken from the `_links.next` href.
fn page_query(http: Arc<dyn HttpClient>, policy: Arc<RetryPolicy>, url: String) -> PageQuery<Changeset> {
    Box::new(move || fetch_page(http, policy, url))
}

fn fetch_page(http: Arc<dyn HttpClient>, policy: Arc<RetryPolicy>, url: String) -> PageFuture<Changeset> {
    Box::pin(async move {
        let response = send_with_retry(http.as_ref(), &policy, HttpRequest::get(url.as_str())).await?;
        let page: ChangesetPage = serde_json::from_str(&response.body).map_err(|error| {
            ApiError::new(
                ApiErrorCode::Unknown,
                format!("unexpected changeset page body: {error}"),
            )
        })?;
        tracing::debug!(url = %url, entities = page.changesets.len(), "changeset page fetched");
        let next = page
            .links
            .next
            .map(|link| page_query(Arc::clone(&http), Arc::clone(&policy), link.href));
        Ok(Page {
            entities: page.changesets,
            next,
        })
    })
}

/// Parameters for a bulk changeset file download.
pub struct DownloadAllParams {
    pub imodel_id: String,
    /// Directory the changeset files are written into, one `{id}.cs` each.
    pub target_dir: PathBuf,
    pub progress: Option<ProgressCallback>,
    pub abort: Option<AbortSignal>,
}

/// Downloads every changeset file of an iModel into `params.target_dir`,
/// keeping at most `max_parallel` transfers in flight. Returns the number of
/// files downloaded.
///
/// A failing transfer does not cancel the others; the first failure is
/// surfaced after all scheduled transfers have settled.
pub async fn download_all(
    http: Arc<dyn HttpClient>,
    policy: Arc<RetryPolicy>,
    transfer: Arc<dyn FileTransfer>,
    base_url: &Url,
    max_parallel: usize,
    params: DownloadAllParams,
) -> Result<u32, ApiError> {
    let mut iterator = list(http, policy, base_url, &params.imodel_id, None)?;
    let mut queue = ParallelTaskQueue::new(max_parallel);
    let mut scheduled = 0u32;

    while let Some(changeset) = iterator.next_entity().await? {
        let Some(link) = changeset.links.download else {
            return Err(ApiError::new(
                ApiErrorCode::ChangesetDownloadFailed,
                format!("changeset {} has no download link", changeset.id),
            ));
        };
        let local_path = params.target_dir.join(format!("{}.cs", changeset.id));
        let transfer = Arc::clone(&transfer);
        let progress = params.progress.clone();
        let abort = params.abort.clone();
        let changeset_id = changeset.id;
        queue.push(async move {
            transfer
                .download(DownloadParams {
                    url: link.href,
                    local_path,
                    progress,
                    abort,
                })
                .await
                .map_err(|error| download_error(&changeset_id, error))
        });
        scheduled += 1;
    }

    tracing::debug!(imodel_id = %params.imodel_id, scheduled, "changeset downloads queued");
    queue.wait_all().await?;
    Ok(scheduled)
}

fn download_error(changeset_id: &str, error: TransferError) -> ApiError {
    match error {
        TransferError::Aborted => ApiError::new(
            ApiErrorCode::DownloadAborted,
            format!("download of changeset {changeset_id} was aborted"),
        ),
        TransferError::Failed(reason) => ApiError::new(
            ApiErrorCode::ChangesetDownloadFailed,
            format!("failed to download changeset {changeset_id}: {reason}"),
        ),
    }
}
