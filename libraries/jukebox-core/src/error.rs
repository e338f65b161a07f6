/// Core error types for the jukebox
use thiserror::Error;

use crate::types::TrackId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the jukebox
#[derive(Error, Debug)]
pub enum CoreError {
    /// Track id is not part of the current catalog
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Index outside of a list the caller rendered
    #[error("Index out of bounds: {index} (len {len})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length of the list at the time of the request
        len: usize,
    },
}
