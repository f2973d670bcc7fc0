//! LLM backend configuration (Ollama)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the generative and embedding backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_host")]
    pub host: String,

    /// Generative model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Timeout for structured classification calls, in seconds
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,

    /// Timeout for open-ended chat calls, in seconds
    #[serde(default = "default_chat_timeout")]
    pub chat_timeout_secs: u64,

    /// Timeout for embedding calls, in seconds
    #[serde(default = "default_embed_timeout")]
    pub embed_timeout_secs: u64,
}

impl LlmConfig {
    /// Structured classification timeout as Duration
    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }

    /// Chat timeout as Duration
    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    /// Embedding timeout as Duration
    pub fn embed_timeout(&self) -> Duration {
        Duration::from_secs(self.embed_timeout_secs)
    }

    /// Validate LLM configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.is_empty() {
            return Err(ValidationError::MissingRequired("LLM__HOST"));
        }
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(ValidationError::InvalidLlmHost);
        }
        if self.generate_timeout_secs == 0
            || self.chat_timeout_secs == 0
            || self.embed_timeout_secs == 0
        {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            generate_timeout_secs: default_generate_timeout(),
            chat_timeout_secs: default_chat_timeout(),
            embed_timeout_secs: default_embed_timeout(),
        }
    }
}

fn default_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3:latest".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_generate_timeout() -> u64 {
    30
}

fn default_chat_timeout() -> u64 {
    120
}

fn default_embed_timeout() -> u64 {
    20
}
