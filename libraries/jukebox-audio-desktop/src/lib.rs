//! Desktop audio output for the jukebox using rodio
//!
//! This crate provides [`RodioChannel`], the [`AudioChannel`] implementation
//! for the system output device, and [`DesktopJukebox`], which runs the
//! playback engine on its own driver thread.
//!
//! # Example
//!
//! ```no_run
//! use jukebox_audio_desktop::{DesktopJukebox, JukeboxCommand};
//! use jukebox_core::Catalog;
//! use jukebox_playback::EngineConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let jukebox = DesktopJukebox::start(Catalog::empty(), EngineConfig::default())?;
//! jukebox.send(JukeboxCommand::Play)?;
//!
//! for event in jukebox.events().iter().take(3) {
//!     println!("{:?}", event);
//! }
//!
//! jukebox.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! [`AudioChannel`]: jukebox_playback::AudioChannel

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod error;
mod loader;
pub mod playback;

pub use channel::RodioChannel;
pub use error::{AudioError, Result};
pub use playback::{apply_command, DesktopJukebox, JukeboxCommand, JukeboxStatus, POLL_INTERVAL};
