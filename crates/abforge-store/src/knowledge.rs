//! Typed access to knowledge-base example artifacts
//!
//! Metadata lives in the `knowledge` collection, partitioned by category;
//! the byte content lives in the blob store under a key derived from the
//! artifact id. Record and blob are a coupled pair: created together,
//! deleted together.

use std::sync::Arc;

use abforge_core::ExampleArtifact;
use serde_json::Value;
use tracing::warn;

use crate::blob::BlobStore;
use crate::document::{DocumentStore, QueryFilter};
use crate::error::{StoreError, StoreResult};

/// Collection holding example artifact metadata
pub const KNOWLEDGE_COLLECTION: &str = "knowledge";

/// Category under which retrievable example scripts are filed
pub const KNOWLEDGE_CATEGORY: &str = "knowledge";

/// MIME type of action button scripts (IronPython)
pub const SCRIPT_MIME: &str = "text/x-python";

/// Blob key for an artifact, derived purely from its id
pub fn blob_key(artifact_id: &str) -> String {
    format!("knowledge/{artifact_id}")
}

/// Typed wrapper over the knowledge collection and its blobs
#[derive(Clone)]
pub struct KnowledgeStore {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl KnowledgeStore {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { docs, blobs }
    }

    /// Store an artifact: blob first, then metadata. If the metadata write
    /// fails the blob is removed again so no orphan is left behind.
    pub async fn create(&self, artifact: &ExampleArtifact, content: &[u8]) -> StoreResult<()> {
        self.blobs
            .put(&artifact.file_path, &artifact.file_type, content.to_vec())
            .await?;

        let doc = serde_json::to_value(artifact)?;
        if let Err(e) = self
            .docs
            .create(KNOWLEDGE_COLLECTION, &artifact.category, &doc)
            .await
        {
            if let Err(cleanup) = self.blobs.delete(&artifact.file_path).await {
                warn!(
                    "Failed to clean up blob {} after metadata write failure: {}",
                    artifact.file_path, cleanup
                );
            }
            return Err(e);
        }
        Ok(())
    }

    /// List artifacts, optionally filtered by category and action button
    /// type, newest first
    pub async fn list(
        &self,
        category: Option<&str>,
        action_button_type: Option<&str>,
    ) -> StoreResult<Vec<ExampleArtifact>> {
        let mut filter = QueryFilter::new().newest_first_by("uploadedAt");
        if let Some(category) = category {
            filter = filter.field_equals("category", category);
        }
        if let Some(abt) = action_button_type {
            filter = filter.field_equals("actionButtonType", abt);
        }

        let docs = self.docs.query(KNOWLEDGE_COLLECTION, &filter).await?;
        docs.into_iter().map(from_document).collect()
    }

    /// Find one artifact by id, scanning across categories
    pub async fn find(&self, id: &str) -> StoreResult<Option<ExampleArtifact>> {
        let filter = QueryFilter::new().field_equals("id", id).limit(1);
        let mut matches = self.docs.query(KNOWLEDGE_COLLECTION, &filter).await?;
        match matches.pop() {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Fetch the byte content for an artifact
    pub async fn content(&self, artifact: &ExampleArtifact) -> StoreResult<Vec<u8>> {
        self.blobs.get(&artifact.file_path).await
    }

    /// Delete an artifact and its blob. The blob goes first; if that
    /// fails the metadata stays so the pair never silently loses its
    /// content record.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let artifact = self.find(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: KNOWLEDGE_COLLECTION.to_string(),
            id: id.to_string(),
        })?;

        match self.blobs.delete(&artifact.file_path).await {
            Ok(()) => {}
            // A missing blob is already the end state we want here
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        self.docs
            .delete(KNOWLEDGE_COLLECTION, &artifact.id, &artifact.category)
            .await
    }

    /// Metadata query behind the example retriever: knowledge-category
    /// script artifacts for one action button type, newest first, capped.
    pub async fn latest_examples(
        &self,
        action_button_type: &str,
        limit: usize,
    ) -> StoreResult<Vec<ExampleArtifact>> {
        let filter = QueryFilter::new()
            .field_equals("category", KNOWLEDGE_CATEGORY)
            .field_equals("actionButtonType", action_button_type)
            .field_equals("fileType", SCRIPT_MIME)
            .newest_first_by("uploadedAt")
            .limit(limit);

        let docs = self.docs.query(KNOWLEDGE_COLLECTION, &filter).await?;
        docs.into_iter().map(from_document).collect()
    }
}

fn from_document(doc: Value) -> StoreResult<ExampleArtifact> {
    serde_json::from_value(doc).map_err(StoreError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBlobStore, MemoryDocumentStore};
    use chrono::Utc;
    use uuid::Uuid;

    fn store() -> KnowledgeStore {
        KnowledgeStore::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    fn artifact(abt: &str, file_type: &str) -> ExampleArtifact {
        let id = Uuid::new_v4().to_string();
        ExampleArtifact {
            file_path: blob_key(&id),
            id,
            category: KNOWLEDGE_CATEGORY.to_string(),
            action_button_type: abt.to_string(),
            file_name: "forecast_refresh.py".to_string(),
            file_type: file_type.to_string(),
            file_size: 8,
            description: Some("Refresh example".to_string()),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_pair() {
        let store = store();
        let artifact = artifact("forecast", SCRIPT_MIME);
        store.create(&artifact, b"print(1)").await.unwrap();

        let found = store.find(&artifact.id).await.unwrap().unwrap();
        assert_eq!(found, artifact);
        assert_eq!(store.content(&found).await.unwrap(), b"print(1)");
    }

    #[tokio::test]
    async fn test_delete_removes_pair() {
        let store = store();
        let artifact = artifact("forecast", SCRIPT_MIME);
        store.create(&artifact, b"print(1)").await.unwrap();

        store.delete(&artifact.id).await.unwrap();
        assert!(store.find(&artifact.id).await.unwrap().is_none());
        assert!(store.content(&artifact).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = store();
        let err = store.delete("absent").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_latest_examples_filters_and_caps() {
        let store = store();

        for _ in 0..4 {
            store
                .create(&artifact("forecast", SCRIPT_MIME), b"print(1)")
                .await
                .unwrap();
        }
        // Different type and non-script MIME must both be excluded
        store
            .create(&artifact("allocation", SCRIPT_MIME), b"print(2)")
            .await
            .unwrap();
        store
            .create(&artifact("forecast", "text/plain"), b"notes")
            .await
            .unwrap();

        let examples = store.latest_examples("forecast", 3).await.unwrap();
        assert_eq!(examples.len(), 3);
        assert!(examples
            .iter()
            .all(|a| a.action_button_type == "forecast" && a.file_type == SCRIPT_MIME));
    }

    #[tokio::test]
    async fn test_latest_examples_orders_newest_first() {
        let store = store();
        let mut older = artifact("forecast", SCRIPT_MIME);
        older.uploaded_at = Utc::now() - chrono::Duration::hours(2);
        older.file_name = "older.py".to_string();
        let newer = artifact("forecast", SCRIPT_MIME);

        store.create(&older, b"print(1)").await.unwrap();
        store.create(&newer, b"print(2)").await.unwrap();

        let examples = store.latest_examples("forecast", 3).await.unwrap();
        assert_eq!(examples[0].id, newer.id);
        assert_eq!(examples[1].id, older.id);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let store = store();
        store
            .create(&artifact("forecast", SCRIPT_MIME), b"print(1)")
            .await
            .unwrap();
        store
            .create(&artifact("allocation", SCRIPT_MIME), b"print(2)")
            .await
            .unwrap();

        let all = store.list(None, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let forecast = store.list(None, Some("forecast")).await.unwrap();
        assert_eq!(forecast.len(), 1);

        let knowledge = store.list(Some(KNOWLEDGE_CATEGORY), None).await.unwrap();
        assert_eq!(knowledge.len(), 2);
    }
}
