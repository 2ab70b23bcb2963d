//! Retry and backoff policy.
//!
//! Encapsulates failure classification (HTTP status ranges, transport
//! failures, timeouts) and backoff decisions so that every outgoing request
//! goes through one consistent policy.

mod backoff;
mod classify;
mod policy;
mod run;

pub use backoff::{Backoff, ExponentialBackoff, FixedBackoff};
pub use classify::{classify, FailureKind};
pub use policy::RetryPolicy;
pub use run::send_with_retry;
