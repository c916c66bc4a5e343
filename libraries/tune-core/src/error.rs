/// Core error types for Tune Player
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `TuneError`
pub type Result<T> = std::result::Result<T, TuneError>;

/// Core error type for Tune Player
#[derive(Error, Debug)]
pub enum TuneError {
    /// Proxy or upstream catalog unreachable
    #[error("Network error: {0}")]
    Network(String),

    /// Catalog reported an application error
    #[error("Upstream error: {message}")]
    Upstream {
        /// Message reported by the catalog
        message: String,
        /// Numeric error code, when the catalog supplies one
        code: Option<i64>,
    },

    /// Response did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// No playable audio could be obtained for a track
    #[error("Playback unavailable: {0}")]
    PlaybackUnavailable(String),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Durable storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TuneError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Failure of one attempt to obtain playable audio for a track
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// Track carries no preview locator
    #[error("Track {0} has no preview URL")]
    NoPreview(TrackId),

    /// Fetch through a proxy or directly failed
    #[error("Network error: {0}")]
    Network(String),

    /// Remote answered with a non-success status
    #[error("HTTP {status} while fetching {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Remote answered successfully but with no audio bytes
    #[error("Empty audio body from {0}")]
    EmptyBody(String),

    /// Every configured strategy failed
    #[error("All {} acquisition strategies failed", .0.len())]
    Exhausted(Vec<(String, AcquisitionError)>),
}

impl From<AcquisitionError> for TuneError {
    fn from(err: AcquisitionError) -> Self {
        Self::PlaybackUnavailable(err.to_string())
    }
}
