//! Catalog of playable tracks built from one folder selection

use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId};
use std::collections::HashMap;

/// Ordered set of tracks discovered by one directory scan
///
/// The order is the scan order and stays stable for the lifetime of the
/// catalog. Tracks are looked up by id in constant time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
}

impl Catalog {
    /// Build a catalog from tracks in display order
    pub fn new(tracks: Vec<Track>) -> Self {
        let index = tracks
            .iter()
            .enumerate()
            .map(|(position, track)| (track.id, position))
            .collect();
        Self { tracks, index }
    }

    /// Empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get a track by id
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.index.get(&id).map(|&position| &self.tracks[position])
    }

    /// Get a track by id, failing if it does not belong to this catalog
    pub fn require(&self, id: TrackId) -> Result<&Track> {
        self.get(id).ok_or(CoreError::TrackNotFound(id))
    }

    /// Check whether an id belongs to this catalog
    pub fn contains(&self, id: TrackId) -> bool {
        self.index.contains_key(&id)
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// All ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.iter().map(|t| t.id)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Filter tracks by a search term
    ///
    /// Case-insensitive substring match on title, artist and album. A blank
    /// query returns every track.
    pub fn search(&self, query: &str) -> Vec<&Track> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.tracks.iter().collect();
        }

        self.tracks
            .iter()
            .filter(|track| track.matches_lowercase(&needle))
            .collect()
    }
}
