//! Azure OpenAI provider implementation
//!
//! Azure addresses a model through a named deployment under the resource
//! endpoint and authenticates with an `api-key` header; the api-version
//! travels as a query parameter.

use crate::client::{ChatClient, ChatRequest, ChatResponse};
use crate::error::{LLMError, Result};
use crate::provider::ChatProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI provider
pub struct AzureOpenAIProvider {
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    client: Client,
}

impl AzureOpenAIProvider {
    /// Create a new Azure OpenAI provider
    ///
    /// `endpoint` is the resource base URL, e.g.
    /// `https://my-resource.openai.azure.com`.
    pub fn new(endpoint: String, api_key: String, deployment: String) -> Self {
        Self {
            endpoint,
            api_key,
            deployment,
            api_version: DEFAULT_API_VERSION.to_string(),
            client: Client::new(),
        }
    }

    /// Override the API version string
    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl ChatClient for AzureOpenAIProvider {
    async fn call(&self, request: ChatRequest) -> Result<ChatResponse> {
        // Build messages
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": request.prompt
        }));

        // Build request body; the deployment in the URL selects the model
        let mut body = json!({
            "messages": messages,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        // Make API call
        let resp = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("Azure OpenAI API call failed: {}", e)))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LLMError::ApiCallFailed(format!(
                "Azure OpenAI API error ({}): {}",
                status, resp_text
            )));
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| LLMError::ApiCallFailed(format!("Failed to parse response: {}", e)))?;

        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LLMError::InvalidResponse("No content in response".to_string()))?
            .to_string();

        let finish_reason = resp_json["choices"][0]["finish_reason"]
            .as_str()
            .unwrap_or("stop")
            .to_string();

        let tokens_used = resp_json["usage"]["total_tokens"].as_u64().unwrap_or(0) as u32;

        Ok(ChatResponse::new(content, self.deployment.clone())
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason))
    }

    fn name(&self) -> &str {
        "azure-openai"
    }
}

impl ChatProvider for AzureOpenAIProvider {
    fn provider_name(&self) -> &str {
        "Azure OpenAI"
    }
}
