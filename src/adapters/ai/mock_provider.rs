//! Mock AI providers for tests.
//!
//! `MockGenerativeProvider` replays a scripted queue of responses;
//! `MockEmbeddingProvider` serves canned vectors keyed by exact text. Both
//! default to failing, which exercises the cascade's stage-miss paths.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::ports::{AiError, EmbeddingProvider, GenerationRequest, GenerativeProvider};

/// Generative provider that replays scripted responses in order.
#[derive(Default)]
pub struct MockGenerativeProvider {
    responses: Mutex<VecDeque<Result<String, AiError>>>,
}

impl MockGenerativeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn push_response(&self, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: AiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }
}

#[async_trait]
impl GenerativeProvider for MockGenerativeProvider {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, AiError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::unavailable("no scripted response")))
    }
}

/// Embedding provider backed by a fixed text-to-vector table.
#[derive(Default)]
pub struct MockEmbeddingProvider {
    vectors: Mutex<HashMap<String, Vec<f32>>>,
    failing: AtomicBool,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the vector returned for an exact text.
    pub fn insert(&self, text: impl Into<String>, vector: Vec<f32>) {
        self.vectors.lock().unwrap().insert(text.into(), vector);
    }

    /// Makes every subsequent call fail, as if the backend were down.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AiError::unavailable("embedding backend down"));
        }
        self.vectors
            .lock()
            .unwrap()
            .get(text)
            .cloned()
            .ok_or_else(|| AiError::unavailable(format!("no vector for: {}", text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generative_mock_replays_in_order() {
        let provider = MockGenerativeProvider::new();
        provider.push_response("first");
        provider.push_error(AiError::unavailable("down"));

        let first = provider.generate(GenerationRequest::new("x")).await;
        assert_eq!(first.unwrap(), "first");

        let second = provider.generate(GenerationRequest::new("x")).await;
        assert!(second.is_err());

        // Exhausted queue fails rather than hanging.
        let third = provider.generate(GenerationRequest::new("x")).await;
        assert!(third.is_err());
    }

    #[tokio::test]
    async fn embedding_mock_serves_registered_vectors() {
        let provider = MockEmbeddingProvider::new();
        provider.insert("open notepad", vec![1.0, 0.0]);

        assert_eq!(provider.embed("open notepad").await.unwrap(), vec![1.0, 0.0]);
        assert!(provider.embed("unseen text").await.is_err());

        provider.fail_all();
        assert!(provider.embed("open notepad").await.is_err());
    }
}
