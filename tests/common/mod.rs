//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use merchant_edge::config::EdgeConfig;
use merchant_edge::http::EdgeServer;
use merchant_edge::lifecycle::Shutdown;

/// Start a simple mock upstream that returns a fixed response body.
pub async fn start_mock_upstream(addr: SocketAddr, response: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Running edge server under test.
#[allow(dead_code)]
pub struct EdgeHandle {
    pub base_url: String,
    pub config_tx: mpsc::UnboundedSender<EdgeConfig>,
    shutdown: Shutdown,
}

/// Start an edge server on `addr` and wait for it to accept connections.
#[allow(dead_code)]
pub async fn start_edge(config: EdgeConfig, addr: SocketAddr) -> EdgeHandle {
    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();

    let server = EdgeServer::new(config).unwrap();
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;

    EdgeHandle {
        base_url: format!("http://{addr}"),
        config_tx,
        shutdown,
    }
}

/// Test config pointing at the given upstream, with defaults elsewhere.
#[allow(dead_code)]
pub fn edge_config(bind: SocketAddr, upstream: SocketAddr) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = bind.to_string();
    config.upstream.address = upstream.to_string();
    config.observability.metrics_enabled = false;
    config
}

/// HTTP client that never follows redirects, so 301s stay observable.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
