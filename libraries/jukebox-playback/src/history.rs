//! Playback history tracking
//!
//! Stack of tracks that were left by moving forward, used by "previous".

use jukebox_core::TrackId;

/// Unbounded playback history (most recent = back)
#[derive(Debug, Clone, Default)]
pub struct History {
    tracks: Vec<TrackId>,
}

impl History {
    /// Create empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add track to history
    pub fn push(&mut self, id: TrackId) {
        self.tracks.push(id);
    }

    /// Pop most recent track from history
    pub fn pop(&mut self) -> Option<TrackId> {
        self.tracks.pop()
    }

    /// Most recent track, without removing it
    pub fn peek(&self) -> Option<TrackId> {
        self.tracks.last().copied()
    }

    /// History entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.iter().copied()
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
