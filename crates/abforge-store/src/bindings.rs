//! Typed access to field binding records
//!
//! Bindings live in the `bindings` collection, partitioned by action
//! button type.

use std::sync::Arc;

use abforge_core::FieldBinding;
use serde_json::Value;
use tracing::warn;

use crate::document::{DocumentStore, QueryFilter};
use crate::error::{StoreError, StoreResult};

/// Collection holding field binding documents
pub const BINDINGS_COLLECTION: &str = "bindings";

/// Typed wrapper over the bindings collection
#[derive(Clone)]
pub struct BindingStore {
    docs: Arc<dyn DocumentStore>,
}

impl BindingStore {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self { docs }
    }

    pub async fn create(&self, binding: &FieldBinding) -> StoreResult<()> {
        let doc = serde_json::to_value(binding)?;
        self.docs
            .create(BINDINGS_COLLECTION, &binding.action_button_type, &doc)
            .await
    }

    /// Point lookup by (id, action button type partition key)
    pub async fn get(&self, id: &str, action_button_type: &str) -> StoreResult<Option<FieldBinding>> {
        let doc = self
            .docs
            .get(BINDINGS_COLLECTION, id, action_button_type)
            .await?;
        doc.map(from_document).transpose()
    }

    /// Resolve a binding by id with a type hint.
    ///
    /// Tries the direct keyed lookup first; on any failure (not found or a
    /// backend error, e.g. a wrong partition key) falls back to a scan on
    /// the id alone, tolerating callers that supplied a wrong or missing
    /// type. Both paths empty means the binding does not exist.
    pub async fn resolve(
        &self,
        id: &str,
        type_hint: Option<&str>,
    ) -> StoreResult<Option<FieldBinding>> {
        if let Some(hint) = type_hint {
            match self.get(id, hint).await {
                Ok(Some(binding)) => return Ok(Some(binding)),
                Ok(None) => {}
                Err(e) => {
                    warn!("Direct binding lookup failed for {}: {}", id, e);
                }
            }
        }

        let filter = QueryFilter::new().field_equals("id", id).limit(1);
        let mut matches = self.docs.query(BINDINGS_COLLECTION, &filter).await?;
        match matches.pop() {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// List bindings, optionally restricted to one action button type,
    /// newest first
    pub async fn list(&self, action_button_type: Option<&str>) -> StoreResult<Vec<FieldBinding>> {
        let mut filter = QueryFilter::new().newest_first_by("createdAt");
        if let Some(abt) = action_button_type {
            filter = filter.field_equals("actionButtonType", abt);
        }

        let docs = self.docs.query(BINDINGS_COLLECTION, &filter).await?;
        docs.into_iter().map(from_document).collect()
    }

    pub async fn replace(&self, binding: &FieldBinding) -> StoreResult<()> {
        let doc = serde_json::to_value(binding)?;
        self.docs
            .replace(
                BINDINGS_COLLECTION,
                &binding.id,
                &binding.action_button_type,
                &doc,
            )
            .await
    }

    pub async fn delete(&self, id: &str, action_button_type: &str) -> StoreResult<()> {
        self.docs
            .delete(BINDINGS_COLLECTION, id, action_button_type)
            .await
    }
}

fn from_document(doc: Value) -> StoreResult<FieldBinding> {
    serde_json::from_value(doc).map_err(StoreError::from)
}
