//! Playlist library with write-through persistence
//!
//! The whole collection lives under one key as a JSON array. Every mutation
//! that changes something re-serializes the collection and writes it back;
//! no-op mutations never touch the store.

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tune_core::{KeyValueStore, Playlist, PlaylistId, Result, Track, TrackId, TuneError};

/// Store key holding the serialized playlist collection
pub const PLAYLISTS_KEY: &str = "playlists";

/// User playlists, including the undeletable favorites collection
pub struct PlaylistLibrary {
    store: Arc<dyn KeyValueStore>,
    // Favorites is always at index 0
    playlists: Vec<Playlist>,
}

impl PlaylistLibrary {
    /// Load the collection from `store`
    ///
    /// A missing or corrupt entry yields just the empty favorites playlist.
    /// A stored collection without favorites gets it re-inserted first.
    ///
    /// # Errors
    /// Returns an error only if the store itself cannot be read
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let playlists = match store.get(PLAYLISTS_KEY).await? {
            None => {
                debug!("No stored playlists, starting with favorites only");
                vec![Playlist::default_playlist()]
            }
            Some(raw) => match serde_json::from_str::<Vec<Playlist>>(&raw) {
                Ok(stored) => normalize(stored),
                Err(e) => {
                    warn!(error = %e, "Stored playlists are unreadable, starting fresh");
                    vec![Playlist::default_playlist()]
                }
            },
        };

        debug!(count = playlists.len(), "Loaded playlists");
        Ok(Self { store, playlists })
    }

    // ===== Reads =====

    /// All playlists, favorites first
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Get playlist by id
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Whether `track_id` is in the playlist (false for unknown playlists)
    pub fn contains_track(&self, playlist_id: &PlaylistId, track_id: TrackId) -> bool {
        self.get(playlist_id)
            .is_some_and(|p| p.contains(track_id))
    }

    /// The favorites collection
    pub fn default_playlist(&self) -> &Playlist {
        &self.playlists[0]
    }

    /// Number of playlists, favorites included
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Always false; favorites cannot be removed
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    // ===== Mutations =====

    /// Create an empty playlist named `name`
    ///
    /// # Errors
    /// `InvalidInput` for a blank name, `Storage` if the write fails (the
    /// playlist is still created in memory)
    pub async fn create(&mut self, name: &str) -> Result<PlaylistId> {
        self.create_with_description(name, None).await
    }

    /// Create an empty playlist with an optional description
    ///
    /// # Errors
    /// See [`create`](Self::create)
    pub async fn create_with_description(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<PlaylistId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TuneError::invalid_input("Playlist name cannot be empty"));
        }

        let id = self.next_id(Utc::now());
        let mut playlist = Playlist::new(id.clone(), name);
        playlist.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        self.playlists.push(playlist);
        info!(playlist_id = %id, name, "Created playlist");

        self.persist().await?;
        Ok(id)
    }

    /// Delete a playlist
    ///
    /// Returns `false` (and writes nothing) for favorites or unknown ids.
    ///
    /// # Errors
    /// `Storage` if the write fails; the playlist stays deleted in memory
    pub async fn delete(&mut self, id: &PlaylistId) -> Result<bool> {
        if id.is_default() {
            debug!("Refusing to delete favorites");
            return Ok(false);
        }

        let Some(index) = self.playlists.iter().position(|p| &p.id == id) else {
            return Ok(false);
        };

        let removed = self.playlists.remove(index);
        info!(playlist_id = %id, name = %removed.name, "Deleted playlist");

        self.persist().await?;
        Ok(true)
    }

    /// Append `track` unless a track with its id is already present
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id, `Storage` if the write fails
    pub async fn add_track(&mut self, track: Track, playlist_id: &PlaylistId) -> Result<bool> {
        let track_id = track.id;
        let added = self.playlist_mut(playlist_id)?.push_unique(track);

        if added {
            debug!(playlist_id = %playlist_id, track_id, "Added track to playlist");
            self.persist().await?;
        }
        Ok(added)
    }

    /// Remove the track with `track_id`
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id, `Storage` if the write fails
    pub async fn remove_track(
        &mut self,
        track_id: TrackId,
        playlist_id: &PlaylistId,
    ) -> Result<bool> {
        let removed = self.playlist_mut(playlist_id)?.remove(track_id);

        if removed {
            debug!(playlist_id = %playlist_id, track_id, "Removed track from playlist");
            self.persist().await?;
        }
        Ok(removed)
    }

    /// Add `track` if absent, remove it if present
    ///
    /// Returns whether the track is in the playlist afterwards.
    ///
    /// # Errors
    /// `PlaylistNotFound` for an unknown id, `Storage` if the write fails
    pub async fn toggle_track(&mut self, track: Track, playlist_id: &PlaylistId) -> Result<bool> {
        if self.contains_track(playlist_id, track.id) {
            self.remove_track(track.id, playlist_id).await?;
            Ok(false)
        } else {
            self.add_track(track, playlist_id).await?;
            Ok(true)
        }
    }

    // ===== Internals =====

    fn playlist_mut(&mut self, id: &PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| TuneError::PlaylistNotFound(id.clone()))
    }

    /// Millisecond timestamp id, bumped until unused
    fn next_id(&self, now: DateTime<Utc>) -> PlaylistId {
        let mut at = now;
        loop {
            let id = PlaylistId::from_timestamp(at);
            if self.get(&id).is_none() {
                return id;
            }
            at += chrono::Duration::milliseconds(1);
        }
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.playlists).map_err(StorageError::from)?;

        self.store
            .set(PLAYLISTS_KEY, &json)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to persist playlists");
                match e {
                    TuneError::Storage(_) => e,
                    other => TuneError::storage(other.to_string()),
                }
            })
    }
}

impl std::fmt::Debug for PlaylistLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistLibrary")
            .field("playlists", &self.playlists)
            .finish_non_exhaustive()
    }
}

/// Favorites first, playlist ids unique, tracks unique per playlist
fn normalize(stored: Vec<Playlist>) -> Vec<Playlist> {
    let mut favorites: Option<Playlist> = None;
    let mut rest: Vec<Playlist> = Vec::with_capacity(stored.len());

    for mut playlist in stored {
        let tracks = std::mem::take(&mut playlist.tracks);
        for track in tracks {
            playlist.push_unique(track);
        }

        if playlist.is_default() {
            if favorites.is_none() {
                favorites = Some(playlist);
            }
        } else if !rest.iter().any(|p| p.id == playlist.id) {
            rest.push(playlist);
        }
    }

    let mut playlists = Vec::with_capacity(rest.len() + 1);
    playlists.push(favorites.unwrap_or_else(Playlist::default_playlist));
    playlists.extend(rest);
    playlists
}
