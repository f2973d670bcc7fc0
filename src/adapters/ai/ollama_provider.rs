//! Ollama Provider - implementation of the AI ports against a local Ollama
//! server.
//!
//! One adapter serves both ports: `/api/generate` for text generation and
//! `/api/embeddings` for embeddings. Every call carries a bounded timeout;
//! structured classification and chat pass different budgets through
//! [`GenerationRequest::timeout`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::ports::{AiError, EmbeddingProvider, GenerationRequest, GenerativeProvider};

/// Client for a local Ollama server.
pub struct OllamaProvider {
    client: Client,
    host: String,
    model: String,
    embedding_model: String,
    generate_timeout: Duration,
    embed_timeout: Duration,
}

impl OllamaProvider {
    /// Creates a provider from LLM configuration.
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            generate_timeout: config.generate_timeout(),
            embed_timeout: config.embed_timeout(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.host)
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.host)
    }

    fn map_transport_error(err: reqwest::Error, timeout: Duration) -> AiError {
        if err.is_timeout() {
            AiError::Timeout {
                timeout_secs: timeout.as_secs(),
            }
        } else if err.is_connect() {
            AiError::network(format!("Connection failed: {}", err))
        } else {
            AiError::network(err.to_string())
        }
    }
}

#[async_trait]
impl GenerativeProvider for OllamaProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AiError> {
        let timeout = request.timeout.unwrap_or(self.generate_timeout);

        let options = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            })
        } else {
            None
        };

        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options,
        };

        let response = self
            .client
            .post(self.generate_url())
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, timeout))?;

        if !response.status().is_success() {
            return Err(AiError::unavailable(format!(
                "generate returned HTTP {}",
                response.status()
            )));
        }

        let decoded: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(e.to_string()))?;

        Ok(decoded.response)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError> {
        let body = OllamaEmbeddingRequest {
            model: &self.embedding_model,
            prompt: text,
        };

        let response = self
            .client
            .post(self.embeddings_url())
            .timeout(self.embed_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, self.embed_timeout))?;

        if !response.status().is_success() {
            return Err(AiError::unavailable(format!(
                "embeddings returned HTTP {}",
                response.status()
            )));
        }

        let decoded: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(e.to_string()))?;

        if decoded.embedding.is_empty() {
            return Err(AiError::parse("embedding response was empty"));
        }

        Ok(decoded.embedding)
    }
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}
