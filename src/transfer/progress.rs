//! Progress reporting for transfers (cumulative bytes vs. total).

use std::sync::Arc;

/// Callback invoked with a progress snapshot as a transfer advances.
pub type ProgressCallback = Arc<dyn Fn(&TransferProgress) + Send + Sync>;

/// Snapshot of one transfer's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Bytes transferred so far.
    pub bytes_transferred: u64,
    /// Total size in bytes.
    pub total_bytes: u64,
}

impl TransferProgress {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_transferred as f64 / self.total_bytes as f64).min(1.0)
    }
}
