//! Minimal HTTP/1.1 server with scripted routes for integration tests.
//!
//! Each route maps a "path?query" string to a sequence of canned responses;
//! one response is consumed per request, and the last one repeats once the
//! sequence is exhausted (so flaky endpoints settle and readiness polls can
//! keep observing the terminal state). Unknown paths get a JSON 404.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// One scripted response.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn error(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Starts a server in a background thread. Returns the base URL (e.g.
/// "http://127.0.0.1:12345"). The server runs until the process exits.
///
/// The literal `{base}` in any scripted body is replaced with the server's
/// own base URL, so hypermedia links (next pages, download hrefs) can point
/// back at the server before its port is known.
pub fn start(routes: Vec<(&str, Vec<CannedResponse>)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);
    let routes: Arc<Mutex<HashMap<String, VecDeque<CannedResponse>>>> = Arc::new(Mutex::new(
        routes
            .into_iter()
            .map(|(path, responses)| {
                let responses: VecDeque<CannedResponse> = responses
                    .into_iter()
                    .map(|mut response| {
                        response.body = response.body.replace("{base}", &base);
                        response
                    })
                    .collect();
                (path.to_string(), responses)
            })
            .collect(),
    ));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    base
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &Mutex<HashMap<String, VecDeque<CannedResponse>>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = parse_target(request);

    let response = {
        let mut routes = routes.lock().unwrap();
        match routes.get_mut(&target) {
            Some(responses) => {
                // Consume one response; keep the last one around for repeats.
                if responses.len() > 1 {
                    responses.pop_front().unwrap()
                } else {
                    responses.front().cloned().expect("route has no responses")
                }
            }
            None => CannedResponse::error(
                404,
                r#"{"error": {"code": "iModelNotFound", "message": "Requested iModel is not available."}}"#,
            ),
        }
    };

    let payload = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes());
}

/// Returns the request target ("path" or "path?query") from the first line.
fn parse_target(request: &str) -> String {
    request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string()
}
