//! Mock chat provider for testing
//!
//! Records every request it receives so tests can assert whether the
//! completion service was reached at all.

use crate::client::{ChatClient, ChatRequest, ChatResponse};
use crate::error::{LLMError, Result};
use crate::provider::ChatProvider;
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock chat provider for testing
pub struct MockProvider {
    name: String,
    default_response: String,
    failure: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            default_response: "# generated by mock provider\ndef main():\n    pass".to_string(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create with custom canned response
    pub fn with_response(response: String) -> Self {
        Self {
            default_response: response,
            ..Self::new()
        }
    }

    /// Create a provider whose every call fails with an API error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|reqs| reqs.len()).unwrap_or(0)
    }

    /// Copy of all requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|reqs| reqs.clone())
            .unwrap_or_default()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockProvider {
    async fn call(&self, request: ChatRequest) -> Result<ChatResponse> {
        let model = request.model.clone();
        if let Ok(mut reqs) = self.requests.lock() {
            reqs.push(request);
        }

        if let Some(message) = &self.failure {
            return Err(LLMError::ApiCallFailed(message.clone()));
        }

        Ok(ChatResponse::new(self.default_response.clone(), model)
            .with_tokens(10)
            .with_finish_reason("stop".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl ChatProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_returns_canned_response() {
        let provider = MockProvider::with_response("print(42)".to_string());
        let request = ChatRequest::new("Test".to_string(), "mock-model".to_string());

        let response = provider.call(request).await.unwrap();
        assert_eq!(response.content, "print(42)");
        assert_eq!(response.model, "mock-model");
    }

    #[tokio::test]
    async fn test_mock_provider_records_requests() {
        let provider = MockProvider::new();
        assert_eq!(provider.call_count(), 0);

        let request = ChatRequest::new("Prompt text".to_string(), "mock-model".to_string())
            .with_system("System text".to_string());
        provider.call(request).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        let recorded = provider.requests();
        assert_eq!(recorded[0].prompt, "Prompt text");
        assert_eq!(recorded[0].system.as_deref(), Some("System text"));
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = MockProvider::failing("quota exceeded");
        let request = ChatRequest::new("Test".to_string(), "mock-model".to_string());

        let err = provider.call(request).await.unwrap_err();
        assert!(matches!(err, LLMError::ApiCallFailed(_)));
        assert!(err.to_string().contains("quota exceeded"));
        // The failed call is still recorded
        assert_eq!(provider.call_count(), 1);
    }
}
