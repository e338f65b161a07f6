//! Error types for playback management

use jukebox_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Channel could not open or decode a track
    #[error("Failed to load track: {0}")]
    ChannelLoad(String),

    /// Channel rejected a play/pause request
    #[error("Channel transport error: {0}")]
    ChannelTransport(String),

    /// Channel could not move to the requested position
    #[error("Seek failed: {0}")]
    Seek(String),

    /// Track id is not part of the current catalog
    #[error("Unknown track: {0}")]
    UnknownTrack(TrackId),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
