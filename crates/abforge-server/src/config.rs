//! Server configuration
//!
//! Layered in the usual order: `.env` file, then `config/server.*`, then
//! `ABFORGE_`-prefixed environment variables (nested keys use `__`, e.g.
//! `ABFORGE_LLM__API_KEY`). Required values for the selected backends are
//! checked once at startup so a misconfigured process dies with a clear
//! diagnostic instead of degrading at request time.

use serde::{Deserialize, Serialize};

/// Storage backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-memory stores (local development and tests)
    Memory,
    /// Managed document/blob services over HTTP
    Api {
        /// Base URL of the document service
        document_base_url: String,
        /// Base URL of the blob service
        blob_base_url: String,
        /// Optional Bearer token for both services
        #[serde(default)]
        api_key: Option<String>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory
    }
}

/// Completion provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProviderKind {
    #[serde(rename = "azure-openai")]
    AzureOpenAI,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "mock")]
    Mock,
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which provider to construct
    pub provider: LlmProviderKind,

    /// Resource endpoint (required for azure-openai)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key (required for azure-openai and openai)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model or deployment identifier
    pub deployment: String,

    /// API version string (azure-openai only)
    #[serde(default)]
    pub api_version: Option<String>,

    /// Maximum completion tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_example_file_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::Mock,
            endpoint: None,
            api_key: None,
            deployment: "mock".to_string(),
            api_version: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ceiling for uploaded knowledge-base file content
    #[serde(default = "default_max_example_file_bytes")]
    pub max_example_file_bytes: u64,

    /// Storage backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Completion service
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_example_file_bytes: default_max_example_file_bytes(),
            store: StoreConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("ABFORGE").separator("__"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Fail fast on missing required values for the selected backends
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.llm.deployment.trim().is_empty() {
            anyhow::bail!("llm.deployment must not be empty");
        }

        match self.llm.provider {
            LlmProviderKind::AzureOpenAI => {
                if self.llm.endpoint.as_deref().unwrap_or("").trim().is_empty() {
                    anyhow::bail!("llm.endpoint is required for the azure-openai provider");
                }
                if self.llm.api_key.as_deref().unwrap_or("").trim().is_empty() {
                    anyhow::bail!("llm.api_key is required for the azure-openai provider");
                }
            }
            LlmProviderKind::OpenAI => {
                if self.llm.api_key.as_deref().unwrap_or("").trim().is_empty() {
                    anyhow::bail!("llm.api_key is required for the openai provider");
                }
            }
            LlmProviderKind::Mock => {}
        }

        if let StoreConfig::Api {
            document_base_url,
            blob_base_url,
            ..
        } = &self.store
        {
            if document_base_url.trim().is_empty() {
                anyhow::bail!("store.document_base_url must not be empty");
            }
            if blob_base_url.trim().is_empty() {
                anyhow::bail!("store.blob_base_url must not be empty");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_example_file_bytes, 5 * 1024 * 1024);
        assert!(matches!(config.store, StoreConfig::Memory));
        assert_eq!(config.llm.provider, LlmProviderKind::Mock);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_provider_kind_serde_names() {
        assert_eq!(
            serde_json::to_value(LlmProviderKind::AzureOpenAI).unwrap(),
            "azure-openai"
        );
        assert_eq!(
            serde_json::to_value(LlmProviderKind::OpenAI).unwrap(),
            "openai"
        );
        assert_eq!(serde_json::to_value(LlmProviderKind::Mock).unwrap(), "mock");
    }
}
