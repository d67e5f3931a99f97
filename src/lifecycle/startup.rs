//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server from validated configuration
//! - Bind the listener
//! - Hook OS signals to graceful shutdown and serve
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::upstream::TransportError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] TransportError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Build, bind and serve until a termination signal arrives.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let address = config.listener.bind_address.clone();
    match serde_json::to_string(&config) {
        Ok(effective) => tracing::info!(config = %effective, "Effective configuration"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize configuration"),
    }
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::forward_to(shutdown));

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
