//! File transfer boundary for large binary objects.
//!
//! Uploads and downloads of changeset files, baseline files, and thumbnails
//! go through an injected `FileTransfer`; the client only schedules
//! transfers and maps their failures into the normalized error model.

mod progress;

pub use progress::{ProgressCallback, TransferProgress};

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;

use crate::control::AbortSignal;

/// Boxed future returned by transfer operations.
pub type TransferFuture = Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send>>;

/// Failure of a single upload or download.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The caller requested abort; the transfer stopped cooperatively.
    #[error("transfer aborted")]
    Aborted,
    /// Anything else: transport failure, storage failure, rejected URL.
    #[error("transfer failed: {0}")]
    Failed(String),
}

/// Parameters for one download.
pub struct DownloadParams {
    pub url: String,
    pub local_path: PathBuf,
    /// Invoked zero or more times with cumulative progress. Must not panic;
    /// transfers do not guard against a panicking callback.
    pub progress: Option<ProgressCallback>,
    pub abort: Option<AbortSignal>,
}

/// Parameters for one upload.
pub struct UploadParams {
    pub url: String,
    pub local_path: PathBuf,
    pub progress: Option<ProgressCallback>,
}

/// Resumable transfer of a local file to or from object storage.
///
/// Object-safe so operations can share one boxed implementation.
pub trait FileTransfer: Send + Sync {
    fn download(&self, params: DownloadParams) -> TransferFuture;
    fn upload(&self, params: UploadParams) -> TransferFuture;
}
