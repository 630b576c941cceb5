//! Error types for the storage layer

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against the document or blob backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found in the given collection
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Blob not found under the given key
    #[error("Blob not found: {key}")]
    BlobNotFound { key: String },

    /// Create collided with an existing document id
    #[error("Document already exists: {collection}/{id}")]
    Conflict { collection: String, id: String },

    /// Document failed to (de)serialize
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend rejected the request
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Request never reached the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// Generic error
    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Whether this error means the addressed item does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. } | StoreError::BlobNotFound { .. }
        )
    }
}
