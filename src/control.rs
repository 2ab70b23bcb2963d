//! Cooperative cancellation for long-running transfers.
//!
//! An `AbortSignal` is shared between the caller and a transfer; requesting
//! abort flips an atomic flag the transfer checks at its next suspension
//! point, failing with the dedicated aborted error rather than a generic
//! transport failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared abort token. Cloning hands out another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests abort. Running transfers observe the flag at their next
    /// check and stop.
    pub fn request_abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    /// True once abort has been requested.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}
