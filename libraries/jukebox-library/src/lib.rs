//! Jukebox Library Scanner
//!
//! Turns a folder selection into a [`Catalog`](jukebox_core::Catalog).
//!
//! # Features
//!
//! - Recursive enumeration with a stable, name-sorted order
//! - Case-insensitive extension filter
//! - Title, artist and album derived from the file layout
//!
//! # Example
//!
//! ```no_run
//! use jukebox_library::{scan_directory, ScanConfig};
//! use std::path::Path;
//!
//! let catalog = scan_directory(Path::new("/music"), &ScanConfig::default())?;
//! println!("{} tracks", catalog.len());
//! # Ok::<(), jukebox_library::LibraryError>(())
//! ```

mod error;
pub mod scanner;

pub use error::LibraryError;
pub use scanner::{is_audio_file, scan_directory, ScanConfig, DEFAULT_EXTENSIONS};

/// Result type for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;
