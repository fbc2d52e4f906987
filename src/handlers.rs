// Axum handlers for the tool endpoint
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ToolError;
use crate::tools::ToolRegistry;
use crate::types::{ToolRequest, ToolResponse};

pub async fn tool_handler(
    State(registry): State<Arc<ToolRegistry>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ToolResponse>, ToolError> {
    let body = body.map_err(|_| ToolError::ReadBody)?;
    let request = ToolRequest::from_slice(&body).map_err(|_| ToolError::Unmarshal)?;
    let result = registry.call(&request.tool, request.args())?;
    Ok(Json(ToolResponse { result }))
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}
