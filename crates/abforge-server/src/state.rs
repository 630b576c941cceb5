//! Application state and component construction
//!
//! All clients are built once at startup from configuration and injected
//! into the handlers through [`AppState`]; nothing is constructed at
//! request time, and tests swap in memory stores plus the mock provider.

use std::sync::Arc;

use abforge_llm::{
    AzureOpenAIProvider, ChatClient, CodeGenerator, CodeGeneratorConfig, MockProvider,
    OpenAIProvider,
};
use abforge_store::{
    BindingStore, BlobStore, DocumentStore, GeneratedCodeStore, HttpBlobStore, HttpDocumentStore,
    KnowledgeStore, MemoryBlobStore, MemoryDocumentStore,
};
use anyhow::Result;
use tracing::info;

use crate::config::{LlmProviderKind, ServerConfig, StoreConfig};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub bindings: BindingStore,
    pub knowledge: KnowledgeStore,
    pub generated: GeneratedCodeStore,
    pub generator: Arc<CodeGenerator>,
    pub max_example_file_bytes: u64,
}

impl AppState {
    /// Assemble state from explicit components
    pub fn new(
        docs: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        client: Arc<dyn ChatClient>,
        generator_config: CodeGeneratorConfig,
        max_example_file_bytes: u64,
    ) -> Self {
        Self {
            bindings: BindingStore::new(docs.clone()),
            knowledge: KnowledgeStore::new(docs.clone(), blobs),
            generated: GeneratedCodeStore::new(docs),
            generator: Arc::new(CodeGenerator::new(client, generator_config)),
            max_example_file_bytes,
        }
    }
}

/// Build application state from configuration
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let (docs, blobs): (Arc<dyn DocumentStore>, Arc<dyn BlobStore>) = match &config.store {
        StoreConfig::Memory => {
            info!("Using in-memory stores");
            (
                Arc::new(MemoryDocumentStore::new()),
                Arc::new(MemoryBlobStore::new()),
            )
        }
        StoreConfig::Api {
            document_base_url,
            blob_base_url,
            api_key,
        } => {
            info!(
                "Using HTTP stores: documents={} blobs={}",
                document_base_url, blob_base_url
            );
            (
                Arc::new(HttpDocumentStore::new(
                    document_base_url.clone(),
                    api_key.clone(),
                )?),
                Arc::new(HttpBlobStore::new(blob_base_url.clone(), api_key.clone())?),
            )
        }
    };

    let client: Arc<dyn ChatClient> = match config.llm.provider {
        LlmProviderKind::AzureOpenAI => {
            // validate() has already established these are present
            let endpoint = config.llm.endpoint.clone().unwrap_or_default();
            let api_key = config.llm.api_key.clone().unwrap_or_default();
            let mut provider =
                AzureOpenAIProvider::new(endpoint, api_key, config.llm.deployment.clone());
            if let Some(api_version) = &config.llm.api_version {
                provider = provider.with_api_version(api_version.clone());
            }
            Arc::new(provider)
        }
        LlmProviderKind::OpenAI => Arc::new(OpenAIProvider::new(
            config.llm.api_key.clone().unwrap_or_default(),
        )),
        LlmProviderKind::Mock => Arc::new(MockProvider::new()),
    };
    info!("Using completion provider: {}", client.name());

    let generator_config = CodeGeneratorConfig::new(config.llm.deployment.clone())
        .with_max_tokens(config.llm.max_tokens)
        .with_temperature(config.llm.temperature);

    Ok(AppState::new(
        docs,
        blobs,
        client,
        generator_config,
        config.max_example_file_bytes,
    ))
}
