//! Document store seam
//!
//! Documents are raw `serde_json::Value` objects; the typed wrappers in
//! this crate do the (de)serialization. Every document carries a string
//! `id` field and lives under a partition key chosen by its collection.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

/// Filter for document queries: equality predicates on top-level fields,
/// optional newest-first ordering, optional limit.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// Field name / expected value pairs, all of which must match
    pub equals: Vec<(String, Value)>,

    /// Order results newest-first by this field (RFC 3339 timestamps or
    /// otherwise lexicographically comparable values)
    pub newest_first_by: Option<String>,

    /// Maximum number of documents to return
    pub limit: Option<usize>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn field_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.equals.push((field.into(), value.into()));
        self
    }

    /// Order newest-first by the given field
    pub fn newest_first_by(mut self, field: impl Into<String>) -> Self {
        self.newest_first_by = Some(field.into());
        self
    }

    /// Cap the number of returned documents
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Async document store trait
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Point reads and writes are keyed by (collection, id, partition key);
/// queries scan a collection across partitions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point lookup by id within a partition. Returns `Ok(None)` when the
    /// id does not exist under that partition key.
    async fn get(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
    ) -> StoreResult<Option<Value>>;

    /// Scan a collection for documents matching the filter
    async fn query(&self, collection: &str, filter: &QueryFilter) -> StoreResult<Vec<Value>>;

    /// Insert a new document. The document must carry an `id` field; a
    /// colliding id yields `StoreError::Conflict` (create, not upsert).
    async fn create(
        &self,
        collection: &str,
        partition_key: &str,
        document: &Value,
    ) -> StoreResult<()>;

    /// Replace an existing document in place
    async fn replace(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
        document: &Value,
    ) -> StoreResult<()>;

    /// Delete a document
    async fn delete(&self, collection: &str, id: &str, partition_key: &str) -> StoreResult<()>;
}
