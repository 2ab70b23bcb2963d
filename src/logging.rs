//! Logging init: tracing subscriber on stderr with env-filter control.
//!
//! The library itself only emits `tracing` events; installing a global
//! subscriber is the embedding application's choice. Call this from
//! application setup (or tests) when no other subscriber is configured.

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. Later calls are no-ops once a global
/// subscriber is installed.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,imodels_client=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
