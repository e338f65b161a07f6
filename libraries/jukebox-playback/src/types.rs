//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// Derived from the engine's fields on every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing and nothing loading
    Idle,

    /// Waiting for a channel to report that a track is ready
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Playing while a crossfade is in flight
    Transitioning,
}

/// Engine timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Length of a crossfade between tracks
    pub fade_duration: Duration,

    /// Interval between crossfade volume writes
    pub fade_tick: Duration,

    /// Interval between progress clock samples
    pub progress_tick: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade_duration: Duration::from_millis(2000),
            fade_tick: Duration::from_millis(50),
            progress_tick: Duration::from_millis(1000),
        }
    }
}

impl EngineConfig {
    /// Number of volume writes in one crossfade (at least 1)
    pub fn fade_steps(&self) -> u32 {
        let tick = self.fade_tick.as_millis();
        if tick == 0 {
            return 1;
        }

        let steps = self.fade_duration.as_millis() / tick;
        u32::try_from(steps).unwrap_or(u32::MAX).max(1)
    }
}
