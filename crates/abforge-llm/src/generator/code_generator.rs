//! Action button code generation
//!
//! Wraps a chat client with the generation configuration and turns an
//! assembled prompt into clean module source. One attempt per call; the
//! caller decides how a failure maps onto its own error surface.

use crate::client::{ChatClient, ChatRequest, ChatResponse};
use crate::error::{LLMError, Result};
use crate::generator::code_extractor::extract_code;
use crate::generator::prompt::AssembledPrompt;
use std::sync::Arc;
use tracing::debug;

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct CodeGeneratorConfig {
    /// Model or deployment identifier
    pub model: String,
    /// Maximum tokens for the completion
    pub max_tokens: Option<u32>,
    /// Temperature (lower = more deterministic code)
    pub temperature: Option<f32>,
}

impl Default for CodeGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tokens: Some(4096),
            temperature: Some(0.2),
        }
    }
}

impl CodeGeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Code generator using a chat-completion client
pub struct CodeGenerator {
    client: Arc<dyn ChatClient>,
    config: CodeGeneratorConfig,
}

impl CodeGenerator {
    /// Create a new code generator
    pub fn new(client: Arc<dyn ChatClient>, config: CodeGeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            config: CodeGeneratorConfig::default(),
        }
    }

    /// Generate module source from an assembled prompt
    ///
    /// # Returns
    /// * `Ok(String)` - Clean module source
    /// * `Err(LLMError)` - Transport failure, or a completion with no
    ///   usable content
    pub async fn generate(&self, prompt: &AssembledPrompt) -> Result<String> {
        let (code, _) = self.generate_with_metadata(prompt).await?;
        Ok(code)
    }

    /// Generate and return both the code and the raw response metadata
    pub async fn generate_with_metadata(
        &self,
        prompt: &AssembledPrompt,
    ) -> Result<(String, ChatResponse)> {
        let request = ChatRequest {
            prompt: prompt.user.clone(),
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: Some(prompt.system.clone()),
        };

        debug!(
            "Requesting completion from '{}' ({} prompt chars)",
            self.client.name(),
            request.prompt.len()
        );
        let response = self.client.call(request).await?;

        let code = extract_code(&response.content)?;
        if code.trim().is_empty() {
            return Err(LLMError::GenerationFailed(
                "Model returned no code".to_string(),
            ));
        }

        Ok((code, response))
    }

    /// Get current configuration
    pub fn config(&self) -> &CodeGeneratorConfig {
        &self.config
    }
}
