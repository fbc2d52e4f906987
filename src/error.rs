//! Error types for the tool endpoint and server startup

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Request-level failures. Each maps to a 4xx plain-text response.
#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("Cannot read body")]
    ReadBody,

    #[error("Cannot unmarshal JSON")]
    Unmarshal,

    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    pub fn status(&self) -> StatusCode {
        match self {
            ToolError::ReadBody | ToolError::Unmarshal => StatusCode::BAD_REQUEST,
            ToolError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Startup failures. Any of these ends the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to bind to address {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
