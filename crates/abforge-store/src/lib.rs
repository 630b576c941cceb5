//! Storage abstraction layer for the action button code service
//!
//! This crate provides trait seams for the two managed storage
//! collaborators (a JSON document service and a blob service) plus typed
//! wrappers for the three collections the service owns.
//!
//! # Backends
//!
//! - **Memory**: dashmap-backed, for tests and local development
//! - **HTTP** (feature `api`): reqwest clients for the managed services
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use abforge_store::{BindingStore, MemoryDocumentStore};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let docs = Arc::new(MemoryDocumentStore::new());
//! let bindings = BindingStore::new(docs);
//!
//! // Direct lookup with a fallback scan when the type hint is wrong
//! let binding = bindings.resolve("binding-id", Some("forecast")).await?;
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod blob;
pub mod document;
pub mod error;
pub mod generated;
pub mod knowledge;
pub mod memory;

#[cfg(feature = "api")]
pub mod http;

// Re-exports - Seams
pub use blob::BlobStore;
pub use document::{DocumentStore, QueryFilter};
pub use error::{StoreError, StoreResult};

// Re-exports - Backends
pub use memory::{MemoryBlobStore, MemoryDocumentStore};

#[cfg(feature = "api")]
pub use http::{HttpBlobStore, HttpDocumentStore};

// Re-exports - Typed stores
pub use bindings::{BindingStore, BINDINGS_COLLECTION};
pub use generated::{GeneratedCodeStore, GENERATED_COLLECTION};
pub use knowledge::{
    blob_key, KnowledgeStore, KNOWLEDGE_CATEGORY, KNOWLEDGE_COLLECTION, SCRIPT_MIME,
};
