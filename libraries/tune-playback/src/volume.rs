//! Volume level and mute state

/// Volume control
///
/// The level is linear in [0.0, 1.0]; muting keeps the level so unmuting
/// restores it.
#[derive(Debug, Clone, Copy)]
pub struct Volume {
    level: f32,
    muted: bool,
}

impl Volume {
    /// Create volume at `level` (clamped)
    pub fn new(level: f32) -> Self {
        let mut volume = Self {
            level: 0.5,
            muted: false,
        };
        volume.set_level(level);
        volume
    }

    /// Current level in [0.0, 1.0]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Set level, clamped to [0.0, 1.0]; NaN is ignored
    pub fn set_level(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        self.level = level.clamp(0.0, 1.0);
    }

    /// Gain to hand to the output (0.0 while muted)
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    /// Mute output
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute output
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_half() {
        let volume = Volume::default();
        assert_eq!(volume.level(), 0.5);
        assert!(!volume.is_muted());
    }

    #[test]
    fn level_is_clamped() {
        let mut volume = Volume::new(2.0);
        assert_eq!(volume.level(), 1.0);

        volume.set_level(-0.3);
        assert_eq!(volume.level(), 0.0);

        volume.set_level(f32::INFINITY);
        assert_eq!(volume.level(), 1.0);
    }

    #[test]
    fn nan_is_ignored() {
        let mut volume = Volume::new(0.7);
        volume.set_level(f32::NAN);
        assert_eq!(volume.level(), 0.7);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(0.8);
        volume.mute();
        assert_eq!(volume.gain(), 0.0);
        assert_eq!(volume.level(), 0.8);

        volume.unmute();
        assert_eq!(volume.gain(), 0.8);
    }

    #[test]
    fn toggle_mute() {
        let mut volume = Volume::default();
        volume.toggle_mute();
        assert!(volume.is_muted());
        volume.toggle_mute();
        assert!(!volume.is_muted());
    }
}
