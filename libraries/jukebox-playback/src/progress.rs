//! Progress snapshots for the now-playing display

use jukebox_core::format_time;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position of the active track as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Position as a percentage of the duration (0-100)
    pub percent: f64,

    /// Elapsed time, `MM:SS`
    pub elapsed: String,

    /// Remaining time, `MM:SS`
    pub remaining: String,
}

impl ProgressSnapshot {
    /// Snapshot shown when nothing is playing
    pub fn zero() -> Self {
        Self {
            percent: 0.0,
            elapsed: format_time(0.0),
            remaining: format_time(0.0),
        }
    }

    /// Snapshot for a sampled position
    pub fn from_position(position: Duration, duration: Duration) -> Self {
        let position = position.min(duration);
        let fraction = if duration.is_zero() {
            0.0
        } else {
            position.as_secs_f64() / duration.as_secs_f64()
        };

        Self {
            percent: (fraction * 100.0).clamp(0.0, 100.0),
            elapsed: format_time(position.as_secs_f64()),
            remaining: format_time((duration - position).as_secs_f64()),
        }
    }

    /// Snapshot for a slider position (`fraction` is clamped to `[0, 1]`)
    pub fn from_fraction(fraction: f64, duration: Duration) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self::from_position(duration.mul_f64(fraction), duration)
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self::zero()
    }
}
