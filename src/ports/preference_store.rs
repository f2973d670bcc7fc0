//! Preference Store Port - persisted disambiguation choices.
//!
//! Keyed by ambiguity domain + discriminator (e.g. `"folder::downloads"`).
//! Upserts are last-writer-wins single-row replaces: under a race the worst
//! case is a lost usage-count increment, never a wrong stored value.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One remembered disambiguation choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// Ambiguity key, unique per domain + discriminator.
    pub key: String,
    /// The most recently chosen resolution.
    pub value: String,
    /// How many times this key has been confirmed. Always >= 1.
    pub usage_count: i64,
}

/// Port for preference persistence.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetches the record for a key, if one exists.
    async fn get(&self, key: &str) -> Result<Option<PreferenceRecord>, PreferenceStoreError>;

    /// Inserts the record with `usage_count = 1`, or replaces the value and
    /// increments the counter. Returns the stored record.
    async fn upsert(&self, key: &str, value: &str)
        -> Result<PreferenceRecord, PreferenceStoreError>;
}

/// Errors from the preference store.
#[derive(Debug, Clone, Error)]
pub enum PreferenceStoreError {
    #[error("preference store error: {0}")]
    Database(String),
}

impl PreferenceStoreError {
    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        PreferenceStoreError::Database(message.into())
    }
}
