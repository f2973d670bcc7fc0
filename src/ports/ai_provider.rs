//! AI Provider Ports - interfaces for the generative and embedding backends.
//!
//! These ports abstract the language-model service (Ollama in production)
//! behind two narrow traits, so the classifiers never couple to a concrete
//! API. Both calls carry bounded timeouts; callers in the resolver cascade
//! treat every error here as a stage miss, never as a pipeline failure.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use deskpilot::ports::{AiError, GenerationRequest, GenerativeProvider};
//!
//! struct CannedProvider;
//!
//! #[async_trait]
//! impl GenerativeProvider for CannedProvider {
//!     async fn generate(&self, _request: GenerationRequest) -> Result<String, AiError> {
//!         Ok("{\"mode\":\"unknown\"}".to_string())
//!     }
//! }
//! ```

use async_trait::async_trait;
use std::time::Duration;

/// Port for text generation.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<String, AiError>;
}

/// Port for text embedding.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a text into a dense vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError>;
}

/// Request for text generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Full prompt text (instructions + input).
    pub prompt: String,
    /// Sampling temperature; `None` uses the backend default.
    pub temperature: Option<f32>,
    /// Cap on generated tokens; `None` uses the backend default.
    pub max_tokens: Option<u32>,
    /// Per-request timeout override. Structured classification uses a short
    /// timeout, open-ended chat a long one.
    pub timeout: Option<Duration>,
}

impl GenerationRequest {
    /// Creates a request with backend defaults.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
            timeout: None,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the generated-token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Errors from the AI backends.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AiError {
    /// Request exceeded its bounded timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Backend reachable but refused or errored.
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// Response arrived but could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AiError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        AiError::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        AiError::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        AiError::Parse(message.into())
    }
}
