//! Single-endpoint HTTP tool server.
//!
//! Every request to `/http` carries a `{"tool": ..., "args": ...}` envelope and
//! receives `{"result": ...}` back. The only registered tool is
//! `get_system_time`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod tools;
pub mod types;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;

use config::ServerConfig;
use error::ConfigError;
use handlers::{not_found, tool_handler};
use tools::ToolRegistry;

/// Build the router. `/http` accepts any method; bodies are read in full
/// with no size limit.
pub fn app(registry: ToolRegistry) -> Router {
    Router::new()
        .route("/http", any(tool_handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .with_state(Arc::new(registry))
}

pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ConfigError> {
    let addr = config.socket_addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| ConfigError::Bind { addr, source })
}
