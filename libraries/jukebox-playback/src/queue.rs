//! User request queue
//!
//! Requested tracks always play before the rotation is consulted.

use jukebox_core::TrackId;

/// Ordered list of requested tracks without duplicates
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    tracks: Vec<TrackId>,
}

impl RequestQueue {
    /// Create empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track to the end of the queue
    ///
    /// Returns `false` (and leaves the queue untouched) if the track is
    /// already queued.
    pub fn enqueue(&mut self, id: TrackId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.tracks.push(id);
        true
    }

    /// Take the next requested track
    pub fn dequeue_front(&mut self) -> Option<TrackId> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.tracks.remove(0))
        }
    }

    /// Remove the track at a position shown to the user
    ///
    /// Out-of-range positions are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<TrackId> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    /// Check whether a track is queued
    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains(&id)
    }

    /// Queued tracks in play order
    pub fn iter(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.iter().copied()
    }

    /// Get number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear the queue
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
