//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use socket_fiddle::config::{LogFormat, ServerConfig};
use socket_fiddle::demos::Demo;
use socket_fiddle::server;
use tokio::sync::oneshot;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Base HTTP URL of the server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Triggers graceful shutdown.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub fn config(demo: Demo, max_connections: usize) -> ServerConfig {
    ServerConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        demo,
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        outbound_queue_capacity: 64,
        max_connections,
        http_request_timeout: Duration::from_secs(5),
        log_format: LogFormat::Text,
    }
}

#[allow(clippy::panic)]
pub async fn spawn(config: ServerConfig) -> TestServer {
    let Ok(listener) = tokio::net::TcpListener::bind(config.listen_addr).await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = server::run(listener, &config, async {
            let _ = rx.await;
        })
        .await;
    });
    TestServer {
        addr,
        shutdown: Some(tx),
    }
}

/// Polls `/health` until `sessions` equals `expected` or two seconds pass.
pub async fn wait_for_sessions(server: &TestServer, expected: u64) -> bool {
    for _ in 0..40 {
        if let Ok(response) = reqwest::get(format!("{}/health", server.url())).await
            && let Ok(body) = response.json::<serde_json::Value>().await
            && body.get("sessions").and_then(serde_json::Value::as_u64) == Some(expected)
        {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
