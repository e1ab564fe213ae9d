//! Static file server for end-to-end tests: serves the artifacts directory
//! over plain HTTP.

use anyhow::{Context, Result};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Every request goes to `ServeDir`; missing files answer 404.
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(&config.root).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Bind the listening socket. Failing to bind is fatal for the server.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.socket_addr();
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))
}

/// Serve until the process is terminated.
pub async fn serve(listener: TcpListener, config: &ServerConfig) -> Result<()> {
    let port = listener.local_addr()?.port();
    info!("Serving HTTP on port {}...", port);
    info!("Serving files from {}", config.root.display());

    axum::serve(listener, router(config))
        .await
        .context("Artifact server stopped unexpectedly")
}
