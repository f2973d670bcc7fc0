//! In-memory implementation of PreferenceStore, for tests and for sessions
//! that opt out of persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{PreferenceRecord, PreferenceStore, PreferenceStoreError};

/// In-memory PreferenceStore with the same upsert semantics as the SQLite
/// adapter.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    records: Mutex<HashMap<String, PreferenceRecord>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<PreferenceRecord>, PreferenceStoreError> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
    ) -> Result<PreferenceRecord, PreferenceStoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(key.to_string())
            .and_modify(|record| {
                record.value = value.to_string();
                record.usage_count += 1;
            })
            .or_insert_with(|| PreferenceRecord {
                key: key.to_string(),
                value: value.to_string(),
                usage_count: 1,
            });
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_then_get() {
        let store = InMemoryPreferenceStore::new();
        assert!(store.is_empty());

        let record = store.upsert("folder::docs", "C:\\Documents").await.unwrap();
        assert_eq!(record.usage_count, 1);

        let record = store.upsert("folder::docs", "D:\\Documents").await.unwrap();
        assert_eq!(record.usage_count, 2);
        assert_eq!(record.value, "D:\\Documents");

        let fetched = store.get("folder::docs").await.unwrap().unwrap();
        assert_eq!(fetched, record);
        assert_eq!(store.len(), 1);
    }
}
