//! Normalized error model.
//!
//! Every failure source (structured API error bodies, transport exceptions,
//! timeouts) converges into one `ApiError` carrying a stable code, so
//! callers branch on the code and log the message.

mod code;
mod parse;

pub use code::ApiErrorCode;
pub use parse::{parse, RawFailure};

use thiserror::Error;

use crate::http::TransportFailure;

/// One entry of a structured error body's detail list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: ApiErrorCode,
    pub message: String,
    /// Property or parameter the detail refers to, when the service names one.
    pub target: Option<String>,
    pub inner_error: Option<InnerError>,
}

/// Nested error carried by some detail entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerError {
    pub code: ApiErrorCode,
}

/// The single error type surfaced by every client operation.
///
/// `details` is present only when the upstream error body carried a detail
/// list; `original_error` only when the error was synthesized from a
/// transport-level failure.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Option<Vec<ErrorDetail>>,
    pub original_error: Option<TransportFailure>,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            original_error: None,
        }
    }
}
