//! Catalog track, artist and album types
//!
//! Field names follow the catalog's JSON so the same structs decode API
//! responses and the persisted playlist collection.

use super::ids::{AlbumId, ArtistId, TrackId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// An artist as referenced by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub picture_small: String,
    #[serde(default)]
    pub picture_medium: String,
    #[serde(default)]
    pub picture_big: String,
    #[serde(default)]
    pub picture_xl: String,
}

/// An album as referenced by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub cover_small: String,
    #[serde(default)]
    pub cover_medium: String,
    #[serde(default)]
    pub cover_big: String,
    #[serde(default)]
    pub cover_xl: String,
}

/// A single playable catalog item
///
/// Immutable once fetched. Two tracks are equal when their ids are equal,
/// regardless of any denormalized metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub title_short: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u32,
    /// Preview clip URL (empty when the catalog has none)
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub artist: Artist,
    #[serde(default)]
    pub album: Album,
}

impl Track {
    /// Whether the catalog supplied a preview clip locator
    pub fn has_preview(&self) -> bool {
        !self.preview.trim().is_empty()
    }

    /// Duration formatted as `m:ss`
    pub fn display_duration(&self) -> String {
        format_duration(self.duration)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Format a duration in seconds as `m:ss`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
