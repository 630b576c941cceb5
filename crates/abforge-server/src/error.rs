//! Server error types
//!
//! Maps the error taxonomy onto HTTP statuses: client input errors 400,
//! missing resources 404, completion-service failures 502, storage and
//! everything else 500. Upstream messages ride along in the JSON body for
//! diagnosis.

use abforge_core::CoreError;
use abforge_llm::LLMError;
use abforge_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Missing or malformed client input
    InvalidRequest(String),

    /// Addressed resource does not exist
    NotFound(String),

    /// Completion-service dependency failed
    Generation(String),

    /// Document/blob backend failed
    Store(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServerError::Generation(msg) => write!(f, "Generation failed: {}", msg),
            ServerError::Store(msg) => write!(f, "Storage error: {}", msg),
            ServerError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Generation(msg) => (StatusCode::BAD_GATEWAY, msg),
            ServerError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } | StoreError::BlobNotFound { .. } => {
                ServerError::NotFound(err.to_string())
            }
            // Identifiers are generated server-side, so a collision is our
            // fault, not the client's
            StoreError::Conflict { .. } => {
                ServerError::Internal(format!("Generated identifier collided: {}", err))
            }
            other => ServerError::Store(other.to_string()),
        }
    }
}

impl From<LLMError> for ServerError {
    fn from(err: LLMError) -> Self {
        ServerError::Generation(err.to_string())
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = ServerError::InvalidRequest("missing field".to_string());
        assert_eq!(err.to_string(), "Invalid request: missing field");
    }

    #[test]
    fn test_into_response_statuses() {
        let cases = [
            (
                ServerError::InvalidRequest("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServerError::Generation("x".into()), StatusCode::BAD_GATEWAY),
            (
                ServerError::Store("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ServerError = StoreError::NotFound {
            collection: "bindings".to_string(),
            id: "b1".to_string(),
        }
        .into();
        assert!(matches!(err, ServerError::NotFound(_)));
    }

    #[test]
    fn test_store_conflict_maps_to_internal() {
        let err: ServerError = StoreError::Conflict {
            collection: "generated-code".to_string(),
            id: "g1".to_string(),
        }
        .into();
        assert!(matches!(err, ServerError::Internal(_)));
    }

    #[test]
    fn test_llm_error_maps_to_generation() {
        let err: ServerError = LLMError::ApiCallFailed("quota".to_string()).into();
        assert!(matches!(err, ServerError::Generation(_)));
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
