//! SQLite implementation of PreferenceStore.
//!
//! Single-table schema, created on connect:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS preferences (
//!     key TEXT PRIMARY KEY,
//!     value TEXT NOT NULL,
//!     usage_count INTEGER NOT NULL DEFAULT 1
//! )
//! ```
//!
//! Upserts are keyed single-row replaces (`ON CONFLICT ... DO UPDATE`), which
//! makes concurrent access last-writer-wins by construction.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::ports::{PreferenceRecord, PreferenceStore, PreferenceStoreError};

/// SQLite implementation of PreferenceStore.
#[derive(Clone)]
pub struct SqlitePreferenceStore {
    pool: SqlitePool,
}

impl SqlitePreferenceStore {
    /// Connects to the database and ensures the schema exists.
    pub async fn connect(url: &str) -> Result<Self, PreferenceStoreError> {
        // In-memory databases are per-connection; keep the pool at one
        // connection so every query sees the same database.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| PreferenceStoreError::database(format!("Failed to connect: {}", e)))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wraps an existing pool (schema must already exist).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_schema(&self) -> Result<(), PreferenceStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                usage_count INTEGER NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PreferenceStoreError::database(format!("Failed to create schema: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<PreferenceRecord>, PreferenceStoreError> {
        let row = sqlx::query(
            r#"
            SELECT key, value, usage_count
            FROM preferences
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PreferenceStoreError::database(format!("Failed to fetch preference: {}", e)))?;

        Ok(row.map(|row| PreferenceRecord {
            key: row.get("key"),
            value: row.get("value"),
            usage_count: row.get("usage_count"),
        }))
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
    ) -> Result<PreferenceRecord, PreferenceStoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO preferences (key, value, usage_count)
            VALUES (?1, ?2, 1)
            ON CONFLICT(key)
            DO UPDATE SET
                value = excluded.value,
                usage_count = usage_count + 1
            RETURNING key, value, usage_count
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            PreferenceStoreError::database(format!("Failed to upsert preference: {}", e))
        })?;

        Ok(PreferenceRecord {
            key: row.get("key"),
            value: row.get("value"),
            usage_count: row.get("usage_count"),
        })
    }
}
