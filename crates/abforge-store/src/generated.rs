//! Typed access to generated code records
//!
//! Records live in the `generated-code` collection, partitioned by the
//! derived project id. Replacement is unconditional: concurrent
//! regenerations race and the last writer wins (documented, not hidden).

use std::sync::Arc;

use abforge_core::GeneratedCodeRecord;
use serde_json::Value;

use crate::document::{DocumentStore, QueryFilter};
use crate::error::{StoreError, StoreResult};

/// Collection holding generated code records
pub const GENERATED_COLLECTION: &str = "generated-code";

/// Typed wrapper over the generated-code collection
#[derive(Clone)]
pub struct GeneratedCodeStore {
    docs: Arc<dyn DocumentStore>,
}

impl GeneratedCodeStore {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self { docs }
    }

    /// Persist a fresh record. Identifiers are generated, never
    /// user-supplied, so a conflict here is a server fault.
    pub async fn create(&self, record: &GeneratedCodeRecord) -> StoreResult<()> {
        let doc = serde_json::to_value(record)?;
        self.docs
            .create(GENERATED_COLLECTION, &record.project_id, &doc)
            .await
    }

    pub async fn get(
        &self,
        id: &str,
        project_id: &str,
    ) -> StoreResult<Option<GeneratedCodeRecord>> {
        let doc = self.docs.get(GENERATED_COLLECTION, id, project_id).await?;
        doc.map(from_document).transpose()
    }

    /// All records for one project, newest first
    pub async fn list_by_project(
        &self,
        project_id: &str,
    ) -> StoreResult<Vec<GeneratedCodeRecord>> {
        let filter = QueryFilter::new()
            .field_equals("projectId", project_id)
            .newest_first_by("generatedAt");

        let docs = self.docs.query(GENERATED_COLLECTION, &filter).await?;
        docs.into_iter().map(from_document).collect()
    }

    /// Overwrite a record in place (regeneration)
    pub async fn replace(&self, record: &GeneratedCodeRecord) -> StoreResult<()> {
        let doc = serde_json::to_value(record)?;
        self.docs
            .replace(GENERATED_COLLECTION, &record.id, &record.project_id, &doc)
            .await
    }
}

fn from_document(doc: Value) -> StoreResult<GeneratedCodeRecord> {
    serde_json::from_value(doc).map_err(StoreError::from)
}
