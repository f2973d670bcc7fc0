//! AI backend adapters.

mod mock_provider;
mod ollama_provider;

pub use mock_provider::{MockEmbeddingProvider, MockGenerativeProvider};
pub use ollama_provider::OllamaProvider;
