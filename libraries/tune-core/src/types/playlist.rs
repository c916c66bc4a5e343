/// Playlist domain types
use super::ids::{PlaylistId, TrackId};
use super::track::Track;
use serde::{Deserialize, Serialize};

/// A user-named ordered collection of tracks
///
/// Tracks are unique by id within one playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered tracks
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Display name of the favorites collection
    pub const DEFAULT_NAME: &'static str = "Favorites";

    /// Create an empty playlist
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            tracks: Vec::new(),
        }
    }

    /// The empty favorites collection
    pub fn default_playlist() -> Self {
        Self::new(PlaylistId::default_id(), Self::DEFAULT_NAME)
    }

    /// Whether this is the favorites collection
    pub fn is_default(&self) -> bool {
        self.id.is_default()
    }

    /// Whether a track with this id is in the playlist
    pub fn contains(&self, track_id: TrackId) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    /// Append a track unless one with the same id is already present
    ///
    /// Returns `true` if the track was appended.
    pub fn push_unique(&mut self, track: Track) -> bool {
        if self.contains(track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove the track with this id
    ///
    /// Returns `true` if a track was removed.
    pub fn remove(&mut self, track_id: TrackId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != track_id);
        self.tracks.len() != before
    }

    /// Cover image: the first track's large album cover
    pub fn cover(&self) -> Option<&str> {
        self.tracks
            .first()
            .map(|t| t.album.cover_big.as_str())
            .filter(|c| !c.is_empty())
    }

    /// Sum of track durations in seconds
    pub fn total_duration(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Album, Artist};

    fn track(id: TrackId, cover: &str) -> Track {
        Track {
            id,
            title: format!("Track {id}"),
            title_short: format!("Track {id}"),
            duration: 30,
            preview: String::new(),
            artist: Artist::default(),
            album: Album {
                cover_big: cover.to_string(),
                ..Album::default()
            },
        }
    }

    #[test]
    fn push_unique_rejects_duplicate_ids() {
        let mut playlist = Playlist::new(PlaylistId::new("p1"), "Road Trip");
        assert!(playlist.push_unique(track(1, "")));
        assert!(!playlist.push_unique(track(1, "")));
        assert_eq!(playlist.tracks.len(), 1);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut playlist = Playlist::new(PlaylistId::new("p1"), "Road Trip");
        playlist.push_unique(track(1, ""));
        assert!(playlist.remove(1));
        assert!(!playlist.remove(1));
        assert!(playlist.tracks.is_empty());
    }

    #[test]
    fn cover_comes_from_first_track() {
        let mut playlist = Playlist::default_playlist();
        assert_eq!(playlist.cover(), None);
        playlist.push_unique(track(1, "https://img/1.jpg"));
        playlist.push_unique(track(2, "https://img/2.jpg"));
        assert_eq!(playlist.cover(), Some("https://img/1.jpg"));
        assert_eq!(playlist.total_duration(), 60);
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let json = serde_json::to_value(Playlist::default_playlist()).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["name"], "Favorites");
        assert_eq!(json["tracks"], serde_json::json!([]));
    }
}
