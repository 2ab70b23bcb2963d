//! Classify raw failures for retry decisions.

use crate::error_model::RawFailure;

/// High-level classification of a failure for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Server-side HTTP error (5xx); retrying can help.
    ServerError(u16),
    /// Client-side HTTP error (4xx); retrying will not change the outcome.
    ClientError(u16),
    /// No response received (DNS, connection, TLS).
    Transport,
    /// The request timed out.
    Timeout,
}

/// Classify a raw failure into a `FailureKind`.
pub fn classify(failure: &RawFailure) -> FailureKind {
    match failure {
        RawFailure::HttpError { status, .. } if *status >= 500 => FailureKind::ServerError(*status),
        RawFailure::HttpError { status, .. } => FailureKind::ClientError(*status),
        RawFailure::TransportError(_) => FailureKind::Transport,
        RawFailure::Timeout => FailureKind::Timeout,
    }
}
