//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Audio output rejected an operation
    #[error("Audio output error: {0}")]
    Output(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
