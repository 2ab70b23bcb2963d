//! HTTP execution boundary.
//!
//! The client never talks to the network directly; requests go through an
//! injected `HttpClient`. Implementations return HTTP error statuses as
//! ordinary responses and raise `TransportFailure` only when no response was
//! received at all.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future returned by [`HttpClient::send`].
pub type SendFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, TransportFailure>> + Send>>;

/// HTTP method subset used by the iModels API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// One outgoing request. `Clone` so the retry loop can re-send it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// GET with no custom headers or body.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// One received response. Error statuses are carried here, not thrown.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Raised by transports when no HTTP response was received (DNS failure,
/// refused connection, broken TLS). Carries the transport's own error code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct TransportFailure {
    pub code: String,
    pub message: String,
}

/// Transport abstraction: send one request, get one response or fail.
///
/// Object-safe so operations, page queries, and the retry loop can share one
/// boxed transport instance.
pub trait HttpClient: Send + Sync {
    fn send(&self, request: HttpRequest) -> SendFuture;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses() {
        let mut response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 304;
        assert!(!response.is_success());
        response.status = 404;
        assert!(!response.is_success());
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }
}
