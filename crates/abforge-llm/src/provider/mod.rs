//! Chat-completion provider implementations

use crate::client::ChatClient;

/// Chat provider trait
pub trait ChatProvider: ChatClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

// Re-export all providers
mod azure_openai;
mod mock;
mod openai;

pub use azure_openai::AzureOpenAIProvider;
pub use mock::MockProvider;
pub use openai::OpenAIProvider;
