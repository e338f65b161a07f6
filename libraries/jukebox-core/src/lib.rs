//! Jukebox Core
//!
//! Platform-agnostic core types and error handling for the jukebox.
//!
//! This crate provides the building blocks shared by the scanner, the
//! playback engine and the front ends:
//! - **Domain Types**: `Track`, `TrackId`, `Catalog`
//! - **Formatting**: `format_time` for elapsed/remaining displays
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::{Catalog, Track, TrackId, format_time};
//! use std::path::PathBuf;
//!
//! let track = Track::new(
//!     TrackId::new(0),
//!     "Intro",
//!     "Band",
//!     "Album",
//!     PathBuf::from("/music/Band/Intro.mp3"),
//! );
//! let catalog = Catalog::new(vec![track]);
//!
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.search("intro").len(), 1);
//! assert_eq!(format_time(65.0), "01:05");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod time;
pub mod types;

pub use catalog::Catalog;
pub use error::{CoreError, Result};
pub use time::format_time;
pub use types::{Track, TrackId, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
