//! Jukebox Events
//!
//! Event-based communication with the front end. The engine buffers events
//! while it runs and the owner drains them after each call:
//! - State changes (play/pause/stop/loading/crossfade)
//! - Track changes (when the new channel starts)
//! - Progress updates (periodic, and while seeking)
//! - Queue and catalog changes
//! - Notices for recoverable failures

use crate::progress::ProgressSnapshot;
use crate::types::PlaybackState;
use jukebox_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the jukebox engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JukeboxEvent {
    /// Derived playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track became the now-playing track
    TrackChanged {
        /// The new (current) track
        track: Track,
        /// ID of the track that was playing before, if any
        previous_track_id: Option<TrackId>,
    },

    /// Crossfade started between the two channels
    CrossfadeStarted {
        /// ID of the outgoing track, if one was bound
        from_track_id: Option<TrackId>,
        /// ID of the incoming track
        to_track_id: TrackId,
        /// Duration of the crossfade in milliseconds
        duration_ms: u64,
    },

    /// Crossfade finished (or was completed early)
    CrossfadeCompleted,

    /// Progress clock sample or seek preview
    Progress(ProgressSnapshot),

    /// Request queue changed
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Catalog was replaced by a new scan
    CatalogReplaced {
        /// Number of tracks in the new catalog
        track_count: usize,
    },

    /// Nothing left to play
    EndOfPlayback,

    /// Recoverable problem worth telling the user about
    Notice {
        /// Message
        message: String,
    },
}

impl JukeboxEvent {
    /// Check whether this is a periodic progress event
    pub fn is_progress(&self) -> bool {
        matches!(self, Self::Progress(_))
    }
}
