//! Shared helpers for HTTP tests

#![allow(dead_code)]

use flashblock_client::{ClientConfig, Endpoint, EndpointRegistry, SubmissionCoordinator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SUBMIT_PATH: &str = "/api/v2/submit-batch";

/// URL of a local port with nothing listening on it
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Server that accepts connections and never answers.
///
/// Returns its URL and a count of connections accepted so far.
pub async fn silent_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    (url, accepted)
}

/// Server that sends a 200 status line and headers, then stalls mid-body
pub async fn stalled_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"data\":",
                    )
                    .await;
                tokio::time::sleep(Duration::from_secs(30)).await;
            });
        }
    });

    url
}

pub fn endpoint(name: &str, url: &str) -> Endpoint {
    Endpoint::new(name, url).unwrap()
}

pub fn registry(endpoints: Vec<Endpoint>) -> EndpointRegistry {
    EndpointRegistry::new(endpoints).unwrap()
}

pub fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_probe_timeout(Duration::from_millis(500))
        .with_submit_timeout(Duration::from_secs(2))
}

pub fn coordinator(endpoints: Vec<Endpoint>) -> SubmissionCoordinator {
    SubmissionCoordinator::new(registry(endpoints), test_config()).unwrap()
}

/// Answer probes with `status` after `delay`
pub async fn mount_probe(server: &MockServer, status: u16, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(status).set_delay(delay))
        .mount(server)
        .await;
}

/// Number of submit-batch requests a server received
pub async fn submit_calls(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == SUBMIT_PATH)
        .count()
}

/// Total requests of any kind a server received
pub async fn total_calls(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

pub fn txs() -> Vec<String> {
    vec!["AQIDBA==".to_string(), "BQYHCA==".to_string()]
}
