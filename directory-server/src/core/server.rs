//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;
use std::time::Duration;

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C / SIGTERM, then drain for at most
    /// `shutdown_timeout_ms`
    pub async fn run(&self) -> Result<()> {
        let app = crate::api::build_app(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!("Directory server listening on {}", addr);

        let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
        let graceful = axum::serve(listener, app).with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        });
        let mut serving = std::pin::pin!(graceful.into_future());

        tokio::select! {
            result = &mut serving => return result.map_err(ServerError::Serve),
            _ = signalled_rx => {}
        }

        let timeout = Duration::from_millis(self.config.shutdown_timeout_ms);
        match tokio::time::timeout(timeout, serving).await {
            Ok(result) => result.map_err(ServerError::Serve)?,
            Err(_) => tracing::warn!(
                timeout_ms = self.config.shutdown_timeout_ms,
                "Graceful shutdown timed out, dropping open connections"
            ),
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down...");
}
