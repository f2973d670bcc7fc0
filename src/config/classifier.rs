//! Intent classifier configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning knobs for the resolver cascade.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum cosine similarity for the semantic stage to accept a tool.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

impl ClassifierConfig {
    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(ValidationError::InvalidSimilarityThreshold);
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

fn default_similarity_threshold() -> f32 {
    0.78
}
