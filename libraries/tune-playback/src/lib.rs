//! Tune Player - Playback Management
//!
//! Platform-agnostic playback management for Tune Player.
//!
//! This crate provides:
//! - Transport state machine (Idle, Loading, Playing, Paused)
//! - Context queue with wrap-around next/previous
//! - Shuffle that never repeats the current track
//! - Repeat-one, seek, volume and mute
//! - Ordered audio acquisition chain with typed failures
//! - Generation tokens so late acquisition results are discarded
//!
//! # Architecture
//!
//! `tune-playback` never decodes or outputs sound itself. The host supplies
//! an [`AudioOutput`] and reports position, duration and end-of-track back
//! through the `on_*` callbacks. Audio is obtained by an
//! [`AcquisitionResolver`] made of [`tune_core::AcquisitionStrategy`]
//! implementations (the catalog crate provides proxied fetch; this crate
//! provides [`DirectStream`]).
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use tune_core::{AcquiredAudio, Track};
//! use tune_playback::{PlaybackManager, PlaybackState, SelectionOutcome};
//!
//! let mut manager = PlaybackManager::default();
//! manager.set_volume(0.8);
//!
//! let track = Track {
//!     id: 3135556,
//!     title: "Harder, Better, Faster, Stronger".to_string(),
//!     duration: 224,
//!     preview: "https://cdn.example.com/preview.mp3".to_string(),
//!     ..Track::default()
//! };
//!
//! // Hosts with their own executor split selection from acquisition
//! let selection = manager.begin_selection(track.clone(), Some(vec![track]));
//! assert_eq!(manager.state(), PlaybackState::Loading);
//!
//! let audio = AcquiredAudio::Remote(selection.track().preview.clone());
//! let outcome = manager.complete_selection(selection, Ok(audio));
//!
//! assert_eq!(outcome, SelectionOutcome::Started);
//! assert_eq!(manager.state(), PlaybackState::Playing);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use tune_core::AcquiredAudio;
//! use tune_playback::{AudioOutput, Result};
//!
//! struct MyOutput;
//!
//! impl AudioOutput for MyOutput {
//!     fn load(&mut self, audio: &AcquiredAudio) -> Result<()> {
//!         // Hand the buffer or URL to the platform player
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, position: f64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, gain: f32) {}
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod acquisition;
pub mod error;
pub mod events;
pub mod manager;
pub mod output;
pub mod queue;
pub mod shuffle;
pub mod types;
pub mod volume;

pub use acquisition::{AcquisitionResolver, DirectStream};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use manager::{PlaybackManager, Selection};
pub use output::{AudioOutput, NullOutput};
pub use queue::Queue;
pub use types::{PlaybackConfig, PlaybackState, SelectionOutcome};
pub use volume::Volume;
