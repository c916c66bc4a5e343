//! Key-value store implementations
//!
//! Values are opaque strings (JSON in practice). Two backends:
//! - [`SqliteStore`]: durable, one row per key in `key_value`
//! - [`MemoryStore`]: process-local, for tests and ephemeral sessions

use crate::database::{create_pool, run_migrations};
use crate::error::StorageError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tune_core::KeyValueStore;

/// `SQLite`-backed key-value store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url`
    ///
    /// # Errors
    /// Returns an error if the connection or migrations fail
    pub async fn open(database_url: &str) -> crate::Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool whose schema is already migrated
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All stored keys, sorted
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub async fn keys(&self) -> crate::Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM key_value ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get::<String, _>("key")).collect())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> tune_core::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_value WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> tune_core::Result<()> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO key_value (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> tune_core::Result<()> {
        sqlx::query("DELETE FROM key_value WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> tune_core::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> tune_core::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> tune_core::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
