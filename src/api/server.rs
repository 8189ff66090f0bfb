//! API server lifecycle: bind, spawn, graceful shutdown.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel. The handle owns the shutdown sender; dropping it without
//! calling shutdown leaves the server running until the process exits.

use std::net::{Ipv4Addr, SocketAddr};

use tokio::sync::oneshot;

use crate::api::router::app_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Bind the API server on localhost and spawn it in a background task.
pub async fn start_server(ctx: ApiContext, port: u16) -> Result<ApiServer, std::io::Error> {
    let listener =
        tokio::net::TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port))).await?;
    let addr = listener.local_addr()?;

    let app = app_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::analysis::LabKnowledge;
    use crate::extraction::MockOcrEngine;

    fn test_ctx(dir: &tempfile::TempDir) -> ApiContext {
        ApiContext::new(
            dir.path().join("mediscan.db"),
            Arc::new(LabKnowledge::bundled().unwrap()),
            Arc::new(MockOcrEngine::returning("")),
        )
    }

    #[tokio::test]
    async fn binds_ephemeral_port_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(&dir), 0).await.unwrap();
        assert_ne!(server.addr.port(), 0);
        assert!(server.addr.ip().is_loopback());
        server.shutdown();
    }

    #[tokio::test]
    async fn serves_health_over_tcp() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(&dir), 0).await.unwrap();

        let mut stream = tokio::net::TcpStream::connect(server.addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        let response = String::from_utf8_lossy(&response);
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("MediScan"));

        server.shutdown();
    }
}
