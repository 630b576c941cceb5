//! API endpoint handlers

mod bindings;
mod generate;
mod knowledge;

pub(super) use bindings::*;
pub(super) use generate::*;
pub(super) use knowledge::*;

use axum::Json;

use super::types::HealthResponse;
use crate::error::ServerError;

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Require a present, non-blank string field from a request payload
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String, ServerError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServerError::InvalidRequest(format!(
            "Missing required field: {}",
            name
        ))),
    }
}
