//! Jukebox - Playback Engine
//!
//! Platform-agnostic playback management for the jukebox.
//!
//! This crate provides:
//! - Random rotation that plays every track once per cycle
//! - Request queue that always plays before the rotation
//! - Playback history for "previous"
//! - Linear crossfades between two alternating channels
//! - Progress clock with seek gestures
//! - Deterministic timers driven by a virtual clock
//!
//! # Architecture
//!
//! `jukebox-playback` does no audio I/O of its own:
//! - No dependency on rodio or any output device
//! - No threads, no wall clock
//!
//! Platform code implements [`AudioChannel`] and drives the engine by
//! polling signals and advancing time. Tests do the same with mock channels.
//!
//! # Example: Driving the engine
//!
//! ```rust,no_run
//! use jukebox_playback::{AudioChannel, EngineConfig, JukeboxEngine};
//! use jukebox_core::Catalog;
//! use std::time::Duration;
//!
//! fn run<C: AudioChannel>(channels: [C; 2], catalog: Catalog) {
//!     let mut engine = JukeboxEngine::new(channels, EngineConfig::default());
//!     engine.replace_catalog(catalog);
//!     engine.play();
//!
//!     loop {
//!         engine.process_signals();
//!         engine.advance(Duration::from_millis(10));
//!         for event in engine.drain_events() {
//!             println!("{:?}", event);
//!         }
//!     }
//! }
//! ```

mod channel;
mod crossfade;
mod engine;
mod error;
mod events;
mod history;
mod progress;
mod queue;
mod rotation;
mod timer;
pub mod types;

// Public exports
pub use channel::{AudioChannel, ChannelSignal, Generation};
pub use crossfade::{Crossfade, FadeLevels};
pub use engine::{JukeboxEngine, CHANNEL_COUNT};
pub use error::{PlaybackError, Result};
pub use events::JukeboxEvent;
pub use history::History;
pub use progress::ProgressSnapshot;
pub use queue::RequestQueue;
pub use rotation::Rotation;
pub use timer::Timer;
pub use types::{EngineConfig, PlaybackState};
