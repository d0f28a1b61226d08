//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use loggo::logging::testing::SharedBuffer;
use loggo::{Level, Log, Logger};
use tokio::net::TcpListener;

/// A real `Logger` writing into a buffer the test can inspect.
#[allow(dead_code)]
pub fn buffered_logger(threshold: Level) -> (Arc<dyn Log>, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger: Arc<dyn Log> = Arc::new(Logger::new(buffer.clone(), threshold));
    (logger, buffer)
}

/// Message part of a plain log line (after tag and timestamp).
#[allow(dead_code)]
pub fn message(line: &str) -> &str {
    line.splitn(3, " | ").nth(2).unwrap_or_default()
}

/// Serve `app` on an ephemeral loopback port.
#[allow(dead_code)]
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
