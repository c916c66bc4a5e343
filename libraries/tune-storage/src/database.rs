//! SQLite pool creation and schema setup

use crate::error::{Result, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

// Embedded so the binary carries its own schema
const MIGRATIONS: &[&str] = &[include_str!(
    "../migrations/20250301000001_create_key_value.sql"
)];

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://tune.db`)
///
/// In-memory databases get a single connection, since every connection to
/// `sqlite::memory:` would otherwise see its own empty database.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    debug!(database_url, "Creating SQLite pool");

    let in_memory = database_url.contains(":memory:");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(if in_memory {
            SqliteJournalMode::Memory
        } else {
            SqliteJournalMode::Wal
        })
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run database migrations
///
/// Safe to call on every start; statements are idempotent.
///
/// # Errors
///
/// Returns an error if any migration fails
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }
    Ok(())
}
