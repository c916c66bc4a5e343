//! Platform-agnostic audio output trait
//!
//! The host platform owns decoding and sound output; the playback manager
//! only drives it through this trait.

use crate::error::Result;
use tune_core::AcquiredAudio;

/// Host-supplied audio output
///
/// Implementors play whatever the acquisition chain produced: an in-memory
/// buffer or a remote locator to stream. Position, duration and end-of-track
/// are reported back to the manager through its `on_*` callbacks.
pub trait AudioOutput: Send {
    /// Prepare `audio` for playback, replacing anything previously loaded
    ///
    /// # Returns
    /// * `Ok(())` - Audio accepted
    /// * `Err(_)` - Format unsupported, locator refused, etc.
    fn load(&mut self, audio: &AcquiredAudio) -> Result<()>;

    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the position
    fn pause(&mut self);

    /// Stop output and unload
    fn stop(&mut self);

    /// Jump to `position` seconds from the start
    fn seek(&mut self, position: f64) -> Result<()>;

    /// Apply a linear gain in [0.0, 1.0]
    fn set_volume(&mut self, gain: f32);

    /// Free anything held for `audio` (temporary objects, handles)
    ///
    /// Called exactly once per loaded audio, when it is superseded.
    fn release(&mut self, audio: &AcquiredAudio) {
        let _ = audio;
    }
}

/// Output that accepts everything and produces no sound
///
/// Useful for headless hosts and tests.
#[derive(Debug, Default)]
pub struct NullOutput {
    loaded: bool,
    playing: bool,
}

impl NullOutput {
    /// Create new null output
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether audio is loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether output is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioOutput for NullOutput {
    fn load(&mut self, _audio: &AcquiredAudio) -> Result<()> {
        self.loaded = true;
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = self.loaded;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.loaded = false;
        self.playing = false;
    }

    fn seek(&mut self, _position: f64) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) {}
}
