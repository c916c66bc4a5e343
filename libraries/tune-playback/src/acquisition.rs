//! Ordered chain of audio acquisition strategies
//!
//! The first strategy that produces audio wins. When all of them fail the
//! chain reports every attempt so callers can log what was tried.

use async_trait::async_trait;
use tracing::{debug, warn};
use tune_core::{AcquiredAudio, AcquisitionError, AcquisitionStrategy, Track};

/// Try strategies in order until one yields audio
#[derive(Default)]
pub struct AcquisitionResolver {
    strategies: Vec<Box<dyn AcquisitionStrategy>>,
}

impl AcquisitionResolver {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy (builder style)
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl AcquisitionStrategy + 'static) -> Self {
        self.push(strategy);
        self
    }

    /// Append a strategy
    pub fn push(&mut self, strategy: impl AcquisitionStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// Strategy names in attempt order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the chain has no strategies
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Obtain playable audio for `track`
    ///
    /// # Errors
    /// * `NoPreview` - the track has no preview locator (no strategy is tried)
    /// * `Exhausted` - every strategy failed; carries each attempt's error
    pub async fn acquire(&self, track: &Track) -> Result<AcquiredAudio, AcquisitionError> {
        if !track.has_preview() {
            return Err(AcquisitionError::NoPreview(track.id));
        }

        let mut failures = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.acquire(track).await {
                Ok(audio) => {
                    debug!(
                        track_id = track.id,
                        strategy = strategy.name(),
                        materialized = audio.is_materialized(),
                        "Acquired audio"
                    );
                    return Ok(audio);
                }
                Err(e) => {
                    warn!(
                        track_id = track.id,
                        strategy = strategy.name(),
                        error = %e,
                        "Acquisition strategy failed"
                    );
                    failures.push((strategy.name().to_string(), e));
                }
            }
        }

        Err(AcquisitionError::Exhausted(failures))
    }
}

impl std::fmt::Debug for AcquisitionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionResolver")
            .field("strategies", &self.names())
            .finish()
    }
}

/// Last-resort strategy: hand the preview locator to the output as-is
///
/// The output streams it directly. Never fails for a track with a preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectStream;

#[async_trait]
impl AcquisitionStrategy for DirectStream {
    fn name(&self) -> &str {
        "direct-stream"
    }

    async fn acquire(&self, track: &Track) -> Result<AcquiredAudio, AcquisitionError> {
        if !track.has_preview() {
            return Err(AcquisitionError::NoPreview(track.id));
        }
        Ok(AcquiredAudio::Remote(track.preview.clone()))
    }
}
