//! Playback queue management
//!
//! The queue is the ordered list the current track was selected from, plus
//! the position of the current track inside it. It is replaced wholesale
//! whenever a selection supplies a new context.

use crate::shuffle::pick_random_index;
use tune_core::Track;

/// Ordered playback context with a cursor
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    index: Option<usize>,
}

impl Queue {
    /// Create empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue; the cursor is cleared
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.index = None;
    }

    /// Point the cursor at the first entry with `track`'s id
    ///
    /// Leaves the cursor unset if the track is not in the queue.
    pub fn focus(&mut self, track: &Track) -> Option<usize> {
        self.index = self.tracks.iter().position(|t| t.id == track.id);
        self.index
    }

    /// Point the cursor at `index`
    ///
    /// Out-of-range indices clear the cursor.
    pub fn set_index(&mut self, index: usize) {
        self.index = (index < self.tracks.len()).then_some(index);
    }

    /// Clear tracks and cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = None;
    }

    /// Cursor position, if the current track is in the queue
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Get queue length
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index the next track would come from
    ///
    /// In order: `(i + 1) mod N`, or the first entry when the cursor is unset.
    /// With shuffle: a uniformly random entry other than the cursor.
    pub fn next_index(&self, shuffle: bool) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        if shuffle {
            return Some(pick_random_index(&mut rand::thread_rng(), len, self.index));
        }

        Some(self.index.map_or(0, |i| (i + 1) % len))
    }

    /// Index the previous track would come from
    ///
    /// `(i - 1 + N) mod N`, or the last entry when the cursor is unset.
    /// Shuffle does not affect going back.
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        Some(self.index.map_or(len - 1, |i| (i + len - 1) % len))
    }
}
