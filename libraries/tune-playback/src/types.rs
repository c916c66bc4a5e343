//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current track
    Idle,

    /// Track selected, audio not yet ready
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// How a selection ended once its acquisition completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Audio is loaded and playing
    Started,

    /// A newer selection (or close) happened first; the result was dropped
    Superseded,

    /// Every acquisition strategy failed, or the output rejected the audio
    Unavailable,
}

/// Configuration for playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.5)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Initial shuffle flag (default: off)
    #[serde(default)]
    pub shuffle: bool,

    /// Initial repeat flag (default: off)
    #[serde(default)]
    pub repeat: bool,
}

fn default_volume() -> f32 {
    0.5
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            shuffle: false,
            repeat: false,
        }
    }
}
