//! Tune Player Storage
//!
//! Durable key-value storage and the playlist library built on it.
//!
//! # Architecture
//!
//! - **Key-value seam**: everything persists through
//!   [`tune_core::KeyValueStore`], so the library works the same on SQLite
//!   and in memory
//! - **Write-through**: playlist mutations are written immediately, whole
//!   collection at a time
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tune_storage::{PlaylistLibrary, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open("sqlite://tune.db").await?;
//! let mut library = PlaylistLibrary::load(Arc::new(store)).await?;
//!
//! let id = library.create("Road trip").await?;
//! println!("{} playlists, newest is {id}", library.len());
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod kv;
mod playlists;

pub use database::{create_pool, run_migrations};
pub use error::{Result, StorageError};
pub use kv::{MemoryStore, SqliteStore};
pub use playlists::{PlaylistLibrary, PLAYLISTS_KEY};
