//! Platform-agnostic audio channel trait
//!
//! A channel is one reusable playback slot: it loads one track at a time and
//! exposes transport and volume control. The engine owns exactly two.

use crate::error::Result;
use jukebox_core::Track;
use std::time::Duration;

/// Tag attached to every load request
pub type Generation = u64;

/// Asynchronous notification from a channel
///
/// Each signal carries the generation of the load it belongs to so the
/// engine can drop signals from superseded loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSignal {
    /// Track is decoded and can start without interruption
    Ready {
        /// Load generation
        generation: Generation,
    },

    /// Track could not be opened, decoded or played
    Failed {
        /// Load generation
        generation: Generation,
        /// Human readable cause
        reason: String,
    },

    /// Track played to its end
    Ended {
        /// Load generation
        generation: Generation,
    },
}

impl ChannelSignal {
    /// Generation the signal belongs to
    pub fn generation(&self) -> Generation {
        match self {
            Self::Ready { generation }
            | Self::Failed { generation, .. }
            | Self::Ended { generation } => *generation,
        }
    }
}

/// One of the engine's two playback slots
///
/// Implementors must not block in any method. Readiness and end-of-track
/// are reported later through [`AudioChannel::poll_signal`].
pub trait AudioChannel {
    /// Start loading a track, replacing whatever was loaded
    ///
    /// The channel stays paused. `Ready` or `Failed` follows via
    /// `poll_signal`; an immediate error may also be returned here.
    fn load(&mut self, track: &Track, generation: Generation) -> Result<()>;

    /// Release decoder and file resources
    fn unload(&mut self);

    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the position
    fn pause(&mut self);

    /// Check if output is paused (an unloaded channel is paused)
    fn is_paused(&self) -> bool;

    /// Current position in the loaded track
    fn position(&self) -> Duration;

    /// Duration of the loaded track, if known
    fn duration(&self) -> Option<Duration>;

    /// Move to a position in the loaded track
    fn set_position(&mut self, position: Duration) -> Result<()>;

    /// Set output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Current output volume
    fn volume(&self) -> f32;

    /// Next pending signal, if any
    fn poll_signal(&mut self) -> Option<ChannelSignal>;

    /// Pause and return to the start of the track
    fn pause_and_rewind(&mut self) -> Result<()> {
        self.pause();
        self.set_position(Duration::ZERO)
    }
}
