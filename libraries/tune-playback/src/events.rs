//! Playback events for UI updates

use crate::types::PlaybackState;
use serde::Serialize;
use tune_core::TrackId;

/// Events emitted by the playback manager
///
/// Collected internally and handed out by `PlaybackManager::drain_events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// New state
        state: PlaybackState,
    },

    /// A new track started playing
    TrackChanged {
        /// Track now playing
        track_id: TrackId,
        /// Track that played before it, if any
        previous_track_id: Option<TrackId>,
    },

    /// Position moved (time update or seek)
    PositionUpdate {
        /// Position in seconds
        position: f64,
        /// Known duration in seconds
        duration: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Level in [0.0, 1.0]
        level: f32,
        /// Mute flag
        is_muted: bool,
    },

    /// Queue was replaced
    QueueChanged {
        /// Number of tracks in the new queue
        length: usize,
    },

    /// Shuffle flag flipped
    ShuffleChanged {
        /// New flag
        enabled: bool,
    },

    /// Repeat flag flipped
    RepeatChanged {
        /// New flag
        enabled: bool,
    },

    /// Selected track could not be played
    AcquisitionFailed {
        /// Track that failed
        track_id: TrackId,
        /// Human-readable reason
        reason: String,
    },
}
