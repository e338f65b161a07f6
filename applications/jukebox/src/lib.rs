//! Jukebox command-line front end
//!
//! Configuration, command parsing and text rendering for the `jukebox`
//! binary. Exposed as a library so they can be tested directly.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use commands::Command;
pub use config::JukeboxConfig;
pub use error::{AppError, Result};
