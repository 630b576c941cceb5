//! Error types for abforge core

use thiserror::Error;

/// Errors produced by core helpers
#[derive(Debug, Error)]
pub enum CoreError {
    /// Version string is not a `major.minor.patch` triple of integers
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
