//! In-process HTTP fixture server for exercising the request pipeline

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A local server answering every request with the same status and body
pub struct FixtureServer {
    /// API base pointing at this server, ending in `/v2/`
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    /// Starts a server on an ephemeral port
    pub async fn spawn(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            body
        );
        Self::spawn_raw(response).await
    }

    /// Starts a server that answers 200 with a `Content-Length` larger than
    /// the body it sends, then closes the connection
    pub async fn spawn_truncated(declared_len: usize, body: impl Into<String>) -> Self {
        let body = body.into();
        assert!(declared_len > body.len(), "Declared length must exceed the body");
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            declared_len, body
        );
        Self::spawn_raw(response).await
    }

    /// Starts a server writing `response` verbatim to every connection
    pub async fn spawn_raw(response: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let server_hits = Arc::clone(&hits);
        let server_requests = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let hits = Arc::clone(&server_hits);
                let requests = Arc::clone(&server_requests);
                let response = response.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]).to_string();
                    requests.lock().unwrap().push(request);
                    hits.fetch_add(1, Ordering::SeqCst);

                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/v2/", addr),
            hits,
            requests,
        }
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Full URL for a path below the API base
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// An address nothing is listening on
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}/v2/", addr)
}
