//! HTTP backends for the managed document and blob services
//!
//! Thin reqwest clients against the storage gateway's REST surface.
//! Status mapping: 404 -> NotFound/BlobNotFound, 409 -> Conflict, any
//! other non-success -> Backend with the upstream status and body attached
//! for diagnosis.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::blob::BlobStore;
use crate::document::{DocumentStore, QueryFilter};
use crate::error::{StoreError, StoreResult};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn build_client() -> StoreResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {}", e)))
}

fn authorize(request: RequestBuilder, api_key: &Option<String>) -> RequestBuilder {
    match api_key {
        Some(key) => request.header("Authorization", format!("Bearer {}", key)),
        None => request,
    }
}

async fn error_from_response(resp: reqwest::Response) -> StoreError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    StoreError::Backend { status, message }
}

/// Document store backed by the managed document service's HTTP API
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDocumentStore {
    /// Create a client for the document service.
    ///
    /// `base_url` is the service root (no trailing slash); `api_key` is
    /// sent as a Bearer token when present.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<impl Into<String>>,
    ) -> StoreResult<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into(),
            api_key: api_key.map(|k| k.into()),
        })
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/collections/{}/docs/{}", self.base_url, collection, id)
    }

    fn query_body(filter: &QueryFilter) -> Value {
        let equals: serde_json::Map<String, Value> = filter
            .equals
            .iter()
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();

        json!({
            "equals": equals,
            "newestFirstBy": filter.newest_first_by,
            "limit": filter.limit,
        })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
    ) -> StoreResult<Option<Value>> {
        let request = self
            .client
            .get(self.doc_url(collection, id))
            .query(&[("partitionKey", partition_key)]);

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Document get failed: {}", e)))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let document = resp.json::<Value>().await.map_err(|e| {
            StoreError::Transport(format!("Failed to parse document response: {}", e))
        })?;
        Ok(Some(document))
    }

    async fn query(&self, collection: &str, filter: &QueryFilter) -> StoreResult<Vec<Value>> {
        let url = format!("{}/collections/{}/query", self.base_url, collection);
        let request = self.client.post(url).json(&Self::query_body(filter));

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Document query failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        resp.json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Transport(format!("Failed to parse query response: {}", e)))
    }

    async fn create(
        &self,
        collection: &str,
        partition_key: &str,
        document: &Value,
    ) -> StoreResult<()> {
        let url = format!("{}/collections/{}/docs", self.base_url, collection);
        let request = self
            .client
            .post(url)
            .query(&[("partitionKey", partition_key)])
            .json(document);

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Document create failed: {}", e)))?;

        if resp.status() == StatusCode::CONFLICT {
            let id = document
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(StoreError::Conflict {
                collection: collection.to_string(),
                id,
            });
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        partition_key: &str,
        document: &Value,
    ) -> StoreResult<()> {
        let request = self
            .client
            .put(self.doc_url(collection, id))
            .query(&[("partitionKey", partition_key)])
            .json(document);

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Document replace failed: {}", e)))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str, partition_key: &str) -> StoreResult<()> {
        let request = self
            .client
            .delete(self.doc_url(collection, id))
            .query(&[("partitionKey", partition_key)]);

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Document delete failed: {}", e)))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }
}

/// Blob store backed by the managed blob service's HTTP API
pub struct HttpBlobStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpBlobStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<impl Into<String>>,
    ) -> StoreResult<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into(),
            api_key: api_key.map(|k| k.into()),
        })
    }

    fn blob_url(&self, key: &str) -> String {
        format!("{}/blobs/{}", self.base_url, key)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> StoreResult<()> {
        let request = self
            .client
            .put(self.blob_url(key))
            .header("Content-Type", content_type)
            .body(bytes);

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Blob put failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let request = self.client.get(self.blob_url(key));

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Blob get failed: {}", e)))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::BlobNotFound {
                key: key.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(format!("Failed to read blob body: {}", e)))?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let request = self.client.delete(self.blob_url(key));

        let resp = authorize(request, &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Blob delete failed: {}", e)))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::BlobNotFound {
                key: key.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }
}
