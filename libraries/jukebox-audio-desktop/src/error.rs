/// Audio output errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable output device
    #[error("Failed to open audio output: {0}")]
    OutputUnavailable(String),

    /// Track file could not be opened
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Track file could not be decoded
    #[error("Cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Driver thread could not be started
    #[error("Failed to start driver thread: {0}")]
    Thread(#[source] std::io::Error),

    /// Driver thread is gone
    #[error("Jukebox driver has stopped")]
    DriverStopped,

    /// Playback error
    #[error("Playback error: {0}")]
    Playback(String),
}

impl From<rodio::StreamError> for AudioError {
    fn from(err: rodio::StreamError) -> Self {
        AudioError::OutputUnavailable(err.to_string())
    }
}

impl From<jukebox_playback::PlaybackError> for AudioError {
    fn from(err: jukebox_playback::PlaybackError) -> Self {
        AudioError::Playback(err.to_string())
    }
}

impl From<AudioError> for jukebox_playback::PlaybackError {
    fn from(err: AudioError) -> Self {
        jukebox_playback::PlaybackError::ChannelLoad(err.to_string())
    }
}
