//! Playback manager - core orchestration
//!
//! Owns the current track, queue, volume and transport flags, drives the
//! host's [`AudioOutput`], and guards against out-of-order acquisition
//! results with a generation token.

use crate::{
    acquisition::{AcquisitionResolver, DirectStream},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::{AudioOutput, NullOutput},
    queue::Queue,
    types::{PlaybackConfig, PlaybackState, SelectionOutcome},
    volume::Volume,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tune_core::{AcquiredAudio, AcquisitionError, Track, TrackId};

/// A track selection waiting for its audio
///
/// Produced by [`PlaybackManager::begin_selection`] and friends, consumed by
/// [`PlaybackManager::complete_selection`]. Carries the generation it was
/// issued under; a completion from an older generation, or a second
/// completion of the same one, is discarded.
#[derive(Debug)]
pub struct Selection {
    generation: u64,
    track: Track,
}

impl Selection {
    /// Generation this selection was issued under
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Track being selected
    pub fn track(&self) -> &Track {
        &self.track
    }
}

/// Main playback manager
pub struct PlaybackManager {
    state: PlaybackState,
    current_track: Option<Track>,
    queue: Queue,
    volume: Volume,
    shuffle: bool,
    repeat: bool,

    // Seconds, as reported by the host
    position: f64,
    duration: f64,

    // Bumped per selection and on close
    generation: u64,
    // Generation whose completion already arrived
    settled: Option<u64>,
    last_started: Option<TrackId>,

    output: Box<dyn AudioOutput>,
    media: Option<AcquiredAudio>,
    resolver: Arc<AcquisitionResolver>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create new playback manager
    pub fn new(
        config: PlaybackConfig,
        mut output: Box<dyn AudioOutput>,
        resolver: AcquisitionResolver,
    ) -> Self {
        let volume = Volume::new(config.volume);
        output.set_volume(volume.gain());

        Self {
            state: PlaybackState::Idle,
            current_track: None,
            queue: Queue::new(),
            volume,
            shuffle: config.shuffle,
            repeat: config.repeat,
            position: 0.0,
            duration: 0.0,
            generation: 0,
            settled: None,
            last_started: None,
            output,
            media: None,
            resolver: Arc::new(resolver),
            pending_events: Vec::new(),
        }
    }

    /// Acquisition chain used by [`select_track`](Self::select_track)
    ///
    /// Hosts that run acquisition themselves clone this, await
    /// `acquire`, then call [`complete_selection`](Self::complete_selection).
    pub fn resolver(&self) -> Arc<AcquisitionResolver> {
        Arc::clone(&self.resolver)
    }

    // ===== Selection =====

    /// Start selecting `track`
    ///
    /// A non-empty `context` replaces the queue; otherwise the queue is kept
    /// and its cursor is moved to `track` (or cleared if absent). Any loaded
    /// audio is stopped and released. State becomes `Loading`.
    pub fn begin_selection(&mut self, track: Track, context: Option<Vec<Track>>) -> Selection {
        if let Some(tracks) = context.filter(|tracks| !tracks.is_empty()) {
            self.queue.replace(tracks);
            self.emit_queue_changed();
        }
        self.queue.focus(&track);
        self.begin(track)
    }

    /// Finish a selection with the result of its acquisition
    ///
    /// Results for a superseded or already completed selection are dropped
    /// without touching any state. On failure the manager goes back to `Idle`
    /// and emits `AcquisitionFailed`.
    pub fn complete_selection(
        &mut self,
        selection: Selection,
        result: std::result::Result<AcquiredAudio, AcquisitionError>,
    ) -> SelectionOutcome {
        if selection.generation != self.generation
            || self.settled == Some(selection.generation)
        {
            debug!(
                track_id = selection.track.id,
                generation = selection.generation,
                current_generation = self.generation,
                "Discarding superseded acquisition"
            );
            return SelectionOutcome::Superseded;
        }

        self.settled = Some(selection.generation);
        let track_id = selection.track.id;
        self.release_media();

        let audio = match result {
            Ok(audio) => audio,
            Err(e) => {
                self.fail_selection(track_id, &e.to_string());
                return SelectionOutcome::Unavailable;
            }
        };

        if let Err(e) = self.output.load(&audio) {
            self.fail_selection(track_id, &e.to_string());
            return SelectionOutcome::Unavailable;
        }
        self.output.set_volume(self.volume.gain());

        if let Err(e) = self.output.play() {
            self.output.stop();
            self.output.release(&audio);
            self.fail_selection(track_id, &e.to_string());
            return SelectionOutcome::Unavailable;
        }

        self.media = Some(audio);
        self.set_state(PlaybackState::Playing);

        let previous_track_id = self.last_started.replace(track_id);
        self.emit_track_changed(track_id, previous_track_id);
        info!(track_id, title = %selection.track.title, "Playing");

        SelectionOutcome::Started
    }

    /// Select `track`, acquire its audio and start playing
    pub async fn select_track(
        &mut self,
        track: Track,
        context: Option<Vec<Track>>,
    ) -> SelectionOutcome {
        let selection = self.begin_selection(track, context);
        self.run_selection(selection).await
    }

    // ===== Playback Control =====

    /// Resume from `Paused`
    ///
    /// No-op in any other state.
    pub fn play(&mut self) -> Result<()> {
        if self.state != PlaybackState::Paused {
            return Ok(());
        }
        self.output.play()?;
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Pause from `Playing`
    ///
    /// No-op in any other state.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.output.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Flip between `Playing` and `Paused`
    ///
    /// No-op while `Idle` or `Loading`.
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Paused => self.play(),
            PlaybackState::Idle | PlaybackState::Loading => Ok(()),
        }
    }

    /// Begin selecting the next queue entry
    ///
    /// Returns `None` (and does nothing) when there is no current track or
    /// the queue is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Selection> {
        self.current_track.as_ref()?;
        let index = self.queue.next_index(self.shuffle)?;
        self.select_queue_index(index)
    }

    /// Begin selecting the previous queue entry
    ///
    /// Returns `None` (and does nothing) when there is no current track or
    /// the queue is empty.
    pub fn previous(&mut self) -> Option<Selection> {
        self.current_track.as_ref()?;
        let index = self.queue.previous_index()?;
        self.select_queue_index(index)
    }

    /// Skip to the next entry and play it
    pub async fn skip_next(&mut self) -> Option<SelectionOutcome> {
        let selection = self.next()?;
        Some(self.run_selection(selection).await)
    }

    /// Skip to the previous entry and play it
    pub async fn skip_previous(&mut self) -> Option<SelectionOutcome> {
        let selection = self.previous()?;
        Some(self.run_selection(selection).await)
    }

    /// Seek within the current track
    ///
    /// The position is clamped into `[0, duration]`.
    ///
    /// # Returns
    /// The position actually applied, in seconds
    pub fn seek(&mut self, seconds: f64) -> Result<f64> {
        if seconds.is_nan() {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let position = seconds.clamp(0.0, self.duration.max(0.0));
        if self.media.is_some() {
            self.output.seek(position)?;
        }
        self.position = position;
        self.emit_position_update();

        Ok(position)
    }

    /// Stop output and return to `Idle`
    ///
    /// Clears the current track, position and duration and invalidates any
    /// acquisition still in flight. The queue is cleared too.
    pub fn close(&mut self) {
        self.release_media();
        self.generation += 1;
        self.current_track = None;
        self.last_started = None;
        self.position = 0.0;
        self.duration = 0.0;

        if !self.queue.is_empty() {
            self.queue.clear();
            self.emit_queue_changed();
        }

        self.set_state(PlaybackState::Idle);
        debug!(generation = self.generation, "Player closed");
    }

    // ===== Volume Control =====

    /// Set volume level (clamped to [0.0, 1.0])
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Get volume level
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle; returns the new flag
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffle);
        self.shuffle
    }

    /// Set shuffle flag
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle != enabled {
            self.shuffle = enabled;
            self.pending_events
                .push(PlaybackEvent::ShuffleChanged { enabled });
        }
    }

    /// Check if shuffle is on
    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    /// Flip repeat; returns the new flag
    pub fn toggle_repeat(&mut self) -> bool {
        self.set_repeat(!self.repeat);
        self.repeat
    }

    /// Set repeat flag
    pub fn set_repeat(&mut self, enabled: bool) {
        if self.repeat != enabled {
            self.repeat = enabled;
            self.pending_events
                .push(PlaybackEvent::RepeatChanged { enabled });
        }
    }

    /// Check if repeat is on
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    // ===== Host Callbacks =====

    /// Output reported a new position (seconds)
    pub fn on_time_update(&mut self, position: f64) {
        if self.current_track.is_none() || position.is_nan() {
            return;
        }
        self.position = position.clamp(0.0, self.duration.max(0.0));
        self.emit_position_update();
    }

    /// Output learned the real duration (seconds)
    pub fn on_duration_known(&mut self, seconds: f64) {
        if self.current_track.is_none() || !seconds.is_finite() || seconds < 0.0 {
            return;
        }
        self.duration = seconds;
        self.position = self.position.min(seconds);
    }

    /// Output reached the end of the current track
    ///
    /// With repeat on the track restarts from zero and `None` is returned.
    /// Otherwise this behaves like [`next`](Self::next).
    pub fn on_track_finished(&mut self) -> Option<Selection> {
        if self.repeat && self.media.is_some() {
            if let Err(e) = self.restart_current() {
                warn!(error = %e, "Failed to restart track for repeat");
            }
            return None;
        }
        self.next()
    }

    /// Handle end of track, playing whatever comes next
    pub async fn finish_track(&mut self) -> Option<SelectionOutcome> {
        let selection = self.on_track_finished()?;
        Some(self.run_selection(selection).await)
    }

    // ===== Query State =====

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Known duration in seconds (0 when idle)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Tracks in the queue
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Index of the current track in the queue
    pub fn queue_index(&self) -> Option<usize> {
        self.queue.index()
    }

    /// Current generation token
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether audio is loaded in the output
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn select_queue_index(&mut self, index: usize) -> Option<Selection> {
        let track = self.queue.get(index)?.clone();
        self.queue.set_index(index);
        Some(self.begin(track))
    }

    fn begin(&mut self, track: Track) -> Selection {
        self.release_media();
        self.generation += 1;
        self.position = 0.0;
        self.duration = f64::from(track.duration);

        debug!(
            track_id = track.id,
            generation = self.generation,
            queue_index = ?self.queue.index(),
            "Selecting track"
        );

        self.current_track = Some(track.clone());
        self.set_state(PlaybackState::Loading);

        Selection {
            generation: self.generation,
            track,
        }
    }

    async fn run_selection(&mut self, selection: Selection) -> SelectionOutcome {
        let resolver = self.resolver();
        let result = resolver.acquire(selection.track()).await;
        self.complete_selection(selection, result)
    }

    fn restart_current(&mut self) -> Result<()> {
        self.output.seek(0.0)?;
        self.position = 0.0;
        self.emit_position_update();
        self.output.play()?;
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    fn fail_selection(&mut self, track_id: TrackId, reason: &str) {
        warn!(track_id, reason, "Track unavailable");
        self.current_track = None;
        self.position = 0.0;
        self.duration = 0.0;
        self.set_state(PlaybackState::Idle);
        self.pending_events.push(PlaybackEvent::AcquisitionFailed {
            track_id,
            reason: reason.to_string(),
        });
    }

    fn release_media(&mut self) {
        if let Some(audio) = self.media.take() {
            self.output.stop();
            self.output.release(&audio);
            debug!(
                source = audio.source_url(),
                materialized = audio.is_materialized(),
                "Released audio"
            );
        }
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_track_changed(&mut self, track_id: TrackId, previous_track_id: Option<TrackId>) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position: self.position,
            duration: self.duration,
        });
    }
}

impl Default for PlaybackManager {
    /// Silent output streaming previews directly
    fn default() -> Self {
        Self::new(
            PlaybackConfig::default(),
            Box::new(NullOutput::new()),
            AcquisitionResolver::new().with_strategy(DirectStream),
        )
    }
}

impl std::fmt::Debug for PlaybackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackManager")
            .field("state", &self.state)
            .field("current_track", &self.current_track.as_ref().map(|t| t.id))
            .field("queue_len", &self.queue.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
