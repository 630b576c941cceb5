//! Blob store seam

use async_trait::async_trait;

use crate::error::StoreResult;

/// Async blob store trait
///
/// Keys are opaque strings chosen by the caller; this crate derives them
/// from artifact ids so user-supplied filenames never become storage keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write (or overwrite) a blob
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> StoreResult<()>;

    /// Read a blob. A missing key is `StoreError::BlobNotFound`; callers
    /// that tolerate absence map it explicitly.
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Delete a blob
    async fn delete(&self, key: &str) -> StoreResult<()>;
}
