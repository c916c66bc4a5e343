//! Tune Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Tune Player.
//!
//! This crate provides the foundational building blocks shared by the
//! catalog client, the playback manager and the playlist library.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Artist`, `Album`, `Playlist`
//! - **Core Traits**: `AcquisitionStrategy` (obtaining playable audio),
//!   `KeyValueStore` (durable storage)
//! - **Error Handling**: Unified `TuneError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tune_core::types::{Playlist, PlaylistId};
//!
//! let favorites = Playlist::default_playlist();
//! assert_eq!(favorites.id, PlaylistId::default_id());
//! assert!(favorites.tracks.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AcquisitionError, Result, TuneError};
pub use traits::{AcquisitionStrategy, KeyValueStore};

pub use types::{
    format_duration, AcquiredAudio, Album, AlbumId, Artist, ArtistId, MaterializedAudio,
    Playlist, PlaylistId, Track, TrackId,
};
