//! Shared test doubles: a real-socket HTTP client and a file transfer that
//! fetches over HTTP and writes to disk.

pub mod api_server;

use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;

use imodels_client::control::AbortSignal;
use imodels_client::http::{HttpClient, HttpRequest, HttpResponse, SendFuture, TransportFailure};
use imodels_client::transfer::{
    DownloadParams, FileTransfer, ProgressCallback, TransferError, TransferFuture, TransferProgress,
    UploadParams,
};

/// Hand-rolled HTTP/1.1 client over a tokio TCP stream. Only what the test
/// server speaks: `Connection: close`, full-body reads.
pub struct TcpHttpClient;

impl HttpClient for TcpHttpClient {
    fn send(&self, request: HttpRequest) -> SendFuture {
        Box::pin(send_once(request))
    }
}

async fn send_once(request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
    let url = Url::parse(&request.url).map_err(|error| TransportFailure {
        code: "EINVAL".to_string(),
        message: format!("invalid url {}: {}", request.url, error),
    })?;
    let host = url.host_str().ok_or_else(|| TransportFailure {
        code: "EINVAL".to_string(),
        message: format!("url has no host: {}", request.url),
    })?;
    let port = url.port_or_known_default().unwrap_or(80);

    let mut stream = tokio::net::TcpStream::connect((host, port))
        .await
        .map_err(|error| TransportFailure {
            code: "ECONNREFUSED".to_string(),
            message: error.to_string(),
        })?;

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    let body = request.body.unwrap_or_default();
    let mut head = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\nContent-Length: {}\r\n",
        request.method.as_str(),
        target,
        host,
        body.len()
    );
    for (name, value) in &request.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    let io_failure = |error: std::io::Error| TransportFailure {
        code: "EIO".to_string(),
        message: error.to_string(),
    };
    stream.write_all(head.as_bytes()).await.map_err(io_failure)?;
    stream.write_all(body.as_bytes()).await.map_err(io_failure)?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.map_err(io_failure)?;
    parse_response(&raw)
}

fn parse_response(raw: &[u8]) -> Result<HttpResponse, TransportFailure> {
    let text = String::from_utf8_lossy(raw);
    let (head, body) = text.split_once("\r\n\r\n").ok_or_else(|| TransportFailure {
        code: "EPROTO".to_string(),
        message: "malformed response: missing header terminator".to_string(),
    })?;
    let mut lines = head.lines();
    let status_line = lines.next().unwrap_or("");
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| TransportFailure {
            code: "EPROTO".to_string(),
            message: format!("malformed status line: {status_line}"),
        })?;
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();
    Ok(HttpResponse {
        status,
        headers,
        body: body.to_string(),
    })
}

/// File transfer that GETs the URL over the test HTTP client and writes the
/// body to the local path. Checks the abort signal before starting and
/// reports one full-size progress snapshot on completion.
pub struct HttpFileTransfer;

impl HttpFileTransfer {
    async fn fetch(url: String, local_path: PathBuf, progress: Option<ProgressCallback>, abort: Option<AbortSignal>) -> Result<(), TransferError> {
        if abort.as_ref().is_some_and(AbortSignal::is_aborted) {
            return Err(TransferError::Aborted);
        }
        let response = send_once(HttpRequest::get(url))
            .await
            .map_err(|error| TransferError::Failed(error.to_string()))?;
        if !response.is_success() {
            return Err(TransferError::Failed(format!("HTTP {}", response.status)));
        }
        if abort.as_ref().is_some_and(AbortSignal::is_aborted) {
            return Err(TransferError::Aborted);
        }
        std::fs::write(&local_path, response.body.as_bytes())
            .map_err(|error| TransferError::Failed(error.to_string()))?;
        if let Some(progress) = progress {
            let total = response.body.len() as u64;
            (progress.as_ref())(&TransferProgress { bytes_transferred: total, total_bytes: total });
        }
        Ok(())
    }
}

impl FileTransfer for HttpFileTransfer {
    fn download(&self, params: DownloadParams) -> TransferFuture {
        Box::pin(Self::fetch(params.url, params.local_path, params.progress, params.abort))
    }

    fn upload(&self, params: UploadParams) -> TransferFuture {
        // The test server has no upload routes; reject so a test that hits
        // this by accident fails loudly.
        Box::pin(async move {
            Err(TransferError::Failed(format!("upload not supported in tests: {}", params.url)))
        })
    }
}
