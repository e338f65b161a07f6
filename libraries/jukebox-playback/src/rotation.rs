//! Random rotation through the catalog
//!
//! Every track plays once per cycle, in random order, before any track
//! repeats.

use jukebox_core::{Catalog, TrackId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// Non-repeating random selector
#[derive(Debug, Clone)]
pub struct Rotation {
    /// Tracks already picked in the current cycle
    played: HashSet<TrackId>,

    rng: StdRng,
}

impl Rotation {
    /// Create a rotation seeded from OS entropy
    pub fn new() -> Self {
        Self {
            played: HashSet::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a rotation with a fixed seed (deterministic order)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            played: HashSet::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick the next track
    ///
    /// Starts a new cycle once every track has been picked. Returns `None`
    /// only for an empty catalog.
    pub fn next(&mut self, catalog: &Catalog) -> Option<TrackId> {
        if catalog.is_empty() {
            return None;
        }

        let mut candidates = self.candidates(catalog);
        if candidates.is_empty() {
            tracing::debug!("Rotation cycle complete, starting a new one");
            self.played.clear();
            candidates = self.candidates(catalog);
        }

        let picked = *candidates.choose(&mut self.rng)?;
        self.played.insert(picked);
        Some(picked)
    }

    /// Forget the current cycle
    pub fn reset(&mut self) {
        self.played.clear();
    }

    /// Number of tracks picked in the current cycle
    pub fn played_count(&self) -> usize {
        self.played.len()
    }

    fn candidates(&self, catalog: &Catalog) -> Vec<TrackId> {
        catalog
            .ids()
            .filter(|id| !self.played.contains(id))
            .collect()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new()
    }
}
