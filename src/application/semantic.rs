//! Semantic Classifier - embedding-similarity stage of the cascade.
//!
//! Embeds the input, compares against every catalog example by cosine
//! similarity, and accepts the best tool only above a fixed threshold.
//! Similarity selects the *tool*, not the arguments: the tool's extractor
//! still runs on the raw text and may reject. Per-example embeddings are
//! computed once and cached for the process lifetime; the cache belongs to
//! this instance, not to ambient global state.
//!
//! Backend failures and timeouts are demoted to a stage miss and logged at
//! `warn`; they never surface to the caller.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{ToolArgs, ToolName};
use crate::ports::EmbeddingProvider;

use super::catalog::INTENT_CATALOG;
use super::extract;

/// Embedding-similarity classifier with a read-through example cache.
pub struct SemanticClassifier {
    embedder: Arc<dyn EmbeddingProvider>,
    threshold: f32,
    screenshot_dir: PathBuf,
    example_cache: Mutex<HashMap<String, Vec<f32>>>,
}

impl SemanticClassifier {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        threshold: f32,
        screenshot_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            embedder,
            threshold,
            screenshot_dir: screenshot_dir.into(),
            example_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Classifies one segment. `None` is a stage miss.
    pub async fn classify(&self, text: &str) -> Option<(ToolName, ToolArgs)> {
        let query = match self.embedder.embed(text).await {
            Ok(vector) => vector,
            Err(err) => {
                warn!(stage = "semantic", error = %err, "embedding backend miss");
                return None;
            }
        };

        let mut best_tool = None;
        let mut best_score = 0.0f32;

        for entry in INTENT_CATALOG {
            for example in entry.examples {
                let Some(example_vec) = self.example_embedding(example).await else {
                    continue;
                };
                let score = cosine(&query, &example_vec);
                if score > best_score {
                    best_score = score;
                    best_tool = Some(entry.tool);
                }
            }
        }

        let tool = best_tool?;
        if best_score < self.threshold {
            debug!(
                stage = "semantic",
                tool = %tool,
                score = best_score,
                threshold = self.threshold,
                "below threshold"
            );
            return None;
        }

        debug!(stage = "semantic", tool = %tool, score = best_score, "tool selected");

        // Similarity picked the tool; extraction can still reject the segment.
        extract::args_for(tool, text, &self.screenshot_dir).map(|args| (tool, args))
    }

    /// Read-through cache of example embeddings, keyed by example text.
    async fn example_embedding(&self, example: &str) -> Option<Vec<f32>> {
        {
            let cache = self.example_cache.lock().await;
            if let Some(vector) = cache.get(example) {
                return Some(vector.clone());
            }
        }

        match self.embedder.embed(example).await {
            Ok(vector) => {
                let mut cache = self.example_cache.lock().await;
                cache.insert(example.to_string(), vector.clone());
                Some(vector)
            }
            Err(err) => {
                warn!(stage = "semantic", example, error = %err, "example embedding miss");
                None
            }
        }
    }

    #[cfg(test)]
    async fn cached_examples(&self) -> usize {
        self.example_cache.lock().await.len()
    }
}

/// Cosine similarity; zero when either vector has zero norm.
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockEmbeddingProvider;

    fn classifier(embedder: Arc<MockEmbeddingProvider>) -> SemanticClassifier {
        SemanticClassifier::new(embedder, 0.78, "data/screenshots")
    }

    #[test]
    fn cosine_basics() {
        assert!((cosine(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn close_match_above_threshold_selects_tool() {
        let embedder = Arc::new(MockEmbeddingProvider::new());
        // Input sits on the same axis as the open_app example.
        embedder.insert("launch chrome please", vec![1.0, 0.05]);
        embedder.insert("open notepad", vec![1.0, 0.0]);

        let classifier = classifier(embedder);
        let (tool, args) = classifier.classify("launch chrome please").await.unwrap();

        assert_eq!(tool, ToolName::OpenApp);
        assert_eq!(args.get_str("app_name"), Some("chrome please"));
    }

    #[tokio::test]
    async fn below_threshold_is_a_miss() {
        let embedder = Arc::new(MockEmbeddingProvider::new());
        embedder.insert("what a day", vec![1.0, 2.0]);
        embedder.insert("open notepad", vec![-2.0, 1.0]);

        let classifier = classifier(embedder);
        assert!(classifier.classify("what a day").await.is_none());
    }

    #[tokio::test]
    async fn backend_failure_is_a_miss_not_an_error() {
        let embedder = Arc::new(MockEmbeddingProvider::new());
        embedder.fail_all();

        let classifier = classifier(embedder);
        assert!(classifier.classify("open notepad").await.is_none());
    }

    #[tokio::test]
    async fn similarity_match_with_failed_extraction_is_a_miss() {
        let embedder = Arc::new(MockEmbeddingProvider::new());
        // Best match is wait(seconds), but the text has no number.
        embedder.insert("hold on", vec![0.0, 1.0]);
        embedder.insert("wait 3 seconds", vec![0.0, 1.0]);

        let classifier = classifier(embedder);
        assert!(classifier.classify("hold on").await.is_none());
    }

    #[tokio::test]
    async fn example_embeddings_are_cached() {
        let embedder = Arc::new(MockEmbeddingProvider::new());
        embedder.insert("launch chrome", vec![1.0, 0.0]);
        embedder.insert("open notepad", vec![1.0, 0.0]);

        let classifier = classifier(embedder.clone());
        classifier.classify("launch chrome").await;
        let cached = classifier.cached_examples().await;
        assert!(cached >= 1);

        // A second pass reuses the cache even if the backend now fails for
        // the cached examples.
        embedder.insert("launch chrome", vec![1.0, 0.0]);
        classifier.classify("launch chrome").await;
        assert!(classifier.cached_examples().await >= cached);
    }
}
