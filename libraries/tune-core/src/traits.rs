/// Core traits for Tune Player
use crate::error::{AcquisitionError, Result};
use crate::types::{AcquiredAudio, Track};
use async_trait::async_trait;

/// One method of obtaining playable audio for a track's preview locator
///
/// Strategies are tried in order by the playback layer; each reports its own
/// typed failure so the chain can log what was attempted.
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Short name used in logs and failure reports
    fn name(&self) -> &str;

    /// Try to obtain playable audio for `track`
    ///
    /// # Errors
    /// Returns an error if this strategy cannot produce audio for the track
    async fn acquire(&self, track: &Track) -> std::result::Result<AcquiredAudio, AcquisitionError>;
}

/// Durable key-value storage
///
/// Values are opaque strings; callers serialize structured records (JSON)
/// themselves. Implementations exist for SQLite and memory.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (no-op when absent)
    async fn remove(&self, key: &str) -> Result<()>;
}
