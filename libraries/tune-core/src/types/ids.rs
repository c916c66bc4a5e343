/// ID types for Tune Player entities
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog track identifier
pub type TrackId = u64;

/// Catalog artist identifier
pub type ArtistId = u64;

/// Catalog album identifier
pub type AlbumId = u64;

/// Playlist identifier
///
/// User playlists get a timestamp-derived id; the favorites collection uses
/// the fixed id `"default"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    const DEFAULT: &'static str = "default";

    /// Create a playlist ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The fixed id of the favorites collection
    pub fn default_id() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// Derive an id from a timestamp (milliseconds since the Unix epoch)
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Whether this is the favorites collection id
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
