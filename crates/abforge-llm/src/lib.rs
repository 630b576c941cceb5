//! abforge-llm - Chat-completion integration for action button generation
//!
//! This crate owns everything between the request pipeline and the hosted
//! completion endpoint:
//! - The [`ChatClient`] seam with Azure OpenAI, OpenAI, and mock providers
//! - Pure prompt assembly from business logic, bindings, and examples
//! - Completion cleanup (fence stripping, empty-output detection)
//!
//! **Note**: one completion call per request, no retry. A transport
//! failure and an empty completion are distinct errors so the server can
//! report them differently.

// Re-export core types
pub use client::{ChatClient, ChatRequest, ChatResponse};
pub use error::{LLMError, Result};

// Re-export providers
pub use provider::{AzureOpenAIProvider, ChatProvider, MockProvider, OpenAIProvider};

// Re-export generator pieces
pub use generator::{
    assemble_prompt, extract_code, AssembledPrompt, CodeGenerator, CodeGeneratorConfig,
    ExampleSource, PromptInput, MAX_EXAMPLE_CHARS, TRUNCATION_MARKER,
};

pub mod client;
pub mod error;
pub mod generator;
pub mod provider;
