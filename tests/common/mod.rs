//! Shared utilities for integration testing against a mock provider API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[allow(dead_code)]
pub const SIGNING_URL: &str = "https://demo.docusign.net/Signing/StartInSession.aspx?t=abc123";

/// A request as seen by the mock provider.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }
}

pub type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Start a programmable mock provider on an ephemeral port.
///
/// Every request is recorded before `handler` picks the `(status, body)`.
pub async fn start_mock_api<F>(handler: F) -> (SocketAddr, Recorded)
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let log = recorded.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        serve_one(socket, handler, log).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

async fn serve_one<F>(mut socket: TcpStream, handler: Arc<F>, log: Recorded)
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    log.lock().unwrap().push(request.clone());

    let (status, body) = handler(&request);
    let status_text = match status {
        200 => "200 OK",
        201 => "201 Created",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response_str = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response_str.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            let (k, v) = line.split_once(':')?;
            Some((k.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (body_start + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[body_start..body_end]).to_string();

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Mock provider behavior for the three signing calls.
#[allow(dead_code)]
pub fn provider_handler(
    login: (u16, String),
    envelope: (u16, String),
    view: (u16, String),
) -> impl Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static {
    move |req| {
        let path = req.path();
        if path.ends_with("/v2/login_information") {
            login.clone()
        } else if path.ends_with("/views/recipient") {
            view.clone()
        } else if path.ends_with("/envelopes") {
            envelope.clone()
        } else {
            (404, r#"{"errorCode":"NOT_FOUND","message":"no route"}"#.to_string())
        }
    }
}

#[allow(dead_code)]
pub fn login_ok() -> (u16, String) {
    (
        200,
        r#"{"loginAccounts":[{"name":"Clinic","accountId":"1703061","accountIdGuid":"8f2a3c5e-0000-4000-8000-000000000001","isDefault":"true"}]}"#
            .to_string(),
    )
}

#[allow(dead_code)]
pub fn envelope_ok() -> (u16, String) {
    (
        201,
        r#"{"envelopeId":"41b4d09b-57f4-4946-8b48-d47251eaabf0","status":"sent","statusDateTime":"2026-10-15T10:00:00Z","uri":"/envelopes/41b4d09b-57f4-4946-8b48-d47251eaabf0"}"#
            .to_string(),
    )
}

#[allow(dead_code)]
pub fn view_ok() -> (u16, String) {
    (200, format!(r#"{{"url":"{}"}}"#, SIGNING_URL))
}

#[allow(dead_code)]
pub fn auth_failed() -> (u16, String) {
    (
        401,
        r#"{"errorCode":"USER_AUTHENTICATION_FAILED","message":"One or both of Username and Password are invalid."}"#
            .to_string(),
    )
}

/// Write a small PDF-looking document into `dir`.
#[allow(dead_code)]
pub fn write_pdf(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("liability-waiver.pdf");
    std::fs::write(&path, b"%PDF-1.4\n% liability waiver\n").unwrap();
    path
}
