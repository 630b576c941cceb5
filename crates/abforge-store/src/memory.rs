//! In-memory backends
//!
//! Dashmap-backed implementations of the store traits, used by tests and
//! by the server's local development mode. Semantics mirror the managed
//! backends: partition-scoped point reads, cross-partition queries,
//! create-not-upsert.

use async_trait::async_trait;
use chrono::DateTime;
use dashmap::DashMap;
use serde_json::Value;
use std::cmp::Ordering;

use crate::blob::BlobStore;
use crate::document::{DocumentStore, QueryFilter};
use crate::error::{StoreError, StoreResult};

/// In-memory document store
#[derive(Default)]
pub struct MemoryDocumentStore {
    /// collection name -> (partition_key + '\u{1}' + id) -> document
    collections: DashMap<String, DashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_key(partition_key: &str, id: &str) -> String {
        format!("{partition_key}\u{1}{id}")
    }

    fn document_id(document: &Value) -> StoreResult<String> {
        document
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Other("Document is missing a string 'id' field".to_string()))
    }
}

/// Compare two JSON values for ordering purposes. Strings that parse as
/// RFC 3339 timestamps compare by instant, so mixed-precision timestamps
/// still order correctly.
fn compare_order_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_str(), b.as_str()) {
        if let (Ok(ta), Ok(tb)) = (
            DateTime::parse_from_rfc3339(a),
            DateTime::parse_from_rfc3339(b),
        ) {
            return ta.cmp(&tb);
        }
        return a.cmp(b);
    }
    a.to_string().cmp(&b.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
    ) -> StoreResult<Option<Value>> {
        let key = Self::composite_key(partition_key, id);
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(&key).map(|doc| doc.value().clone())))
    }

    async fn query(&self, collection: &str, filter: &QueryFilter) -> StoreResult<Vec<Value>> {
        let mut matches: Vec<Value> = match self.collections.get(collection) {
            Some(docs) => docs
                .iter()
                .filter(|entry| {
                    filter
                        .equals
                        .iter()
                        .all(|(field, expected)| entry.value().get(field) == Some(expected))
                })
                .map(|entry| entry.value().clone())
                .collect(),
            None => Vec::new(),
        };

        if let Some(order_field) = &filter.newest_first_by {
            matches.sort_by(|a, b| {
                let a_key = a.get(order_field).unwrap_or(&Value::Null);
                let b_key = b.get(order_field).unwrap_or(&Value::Null);
                compare_order_values(b_key, a_key)
            });
        }

        if let Some(limit) = filter.limit {
            matches.truncate(limit);
        }

        Ok(matches)
    }

    async fn create(
        &self,
        collection: &str,
        partition_key: &str,
        document: &Value,
    ) -> StoreResult<()> {
        let id = Self::document_id(document)?;
        let key = Self::composite_key(partition_key, &id);
        let docs = self.collections.entry(collection.to_string()).or_default();

        let result = match docs.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::Conflict {
                collection: collection.to_string(),
                id,
            }),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(document.clone());
                Ok(())
            }
        };
        result
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
        document: &Value,
    ) -> StoreResult<()> {
        let key = Self::composite_key(partition_key, id);
        let docs = self.collections.entry(collection.to_string()).or_default();

        let result = match docs.get_mut(&key) {
            Some(mut existing) => {
                *existing = document.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        };
        result
    }

    async fn delete(&self, collection: &str, id: &str, partition_key: &str) -> StoreResult<()> {
        let key = Self::composite_key(partition_key, id);
        let removed = self
            .collections
            .get(collection)
            .and_then(|docs| docs.remove(&key));

        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }
}

/// In-memory blob store
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, (String, Vec<u8>)>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content type recorded for a stored blob, if present
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.blobs.get(key).map(|entry| entry.value().0.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> StoreResult<()> {
        self.blobs
            .insert(key.to_string(), (content_type.to_string(), bytes));
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.blobs
            .get(key)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| StoreError::BlobNotFound {
                key: key.to_string(),
            })
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        match self.blobs.remove(key) {
            Some(_) => Ok(()),
            None => Err(StoreError::BlobNotFound {
                key: key.to_string(),
            }),
        }
    }
}
