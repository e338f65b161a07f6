//! Track identity and metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Artist name used when a track sits directly in the scan root
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album name used when a track sits directly in the scan root
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Track identifier
///
/// Assigned sequentially while a catalog is built. An id is only meaningful
/// inside the catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(u32);

impl TrackId {
    /// Create a track ID from its raw value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TrackId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Playable audio item
///
/// Immutable once created. Duration is deliberately absent: the channel
/// decoding the file reports it when the track is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Identifier within the owning catalog
    pub id: TrackId,

    /// Track title (file name without extension)
    pub title: String,

    /// Artist name (parent folder or `UNKNOWN_ARTIST`)
    pub artist: String,

    /// Album name (parent folder or `UNKNOWN_ALBUM`)
    pub album: String,

    /// File path handed to the decoder
    pub path: PathBuf,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            path: path.into(),
        }
    }

    /// File path handed to the decoder
    pub fn locator(&self) -> &Path {
        &self.path
    }

    /// Whether the artist is a real folder name rather than the sentinel
    pub fn has_known_artist(&self) -> bool {
        !self.artist.trim().is_empty() && !self.artist.eq_ignore_ascii_case(UNKNOWN_ARTIST)
    }

    /// Now-playing line: `"Title - Artist"`, or just the title when the
    /// artist is unknown
    pub fn display_line(&self) -> String {
        if self.has_known_artist() {
            format!("{} - {}", self.title, self.artist)
        } else {
            self.title.clone()
        }
    }

    /// Case-insensitive substring match against title, artist and album
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
            || self.album.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str) -> Track {
        Track::new(
            TrackId::new(7),
            "Song",
            artist,
            "Album",
            PathBuf::from("/music/Song.mp3"),
        )
    }

    #[test]
    fn display_line_includes_known_artist() {
        assert_eq!(track("Band").display_line(), "Song - Band");
    }

    #[test]
    fn display_line_hides_unknown_artist() {
        assert_eq!(track(UNKNOWN_ARTIST).display_line(), "Song");
        assert_eq!(track("unknown artist").display_line(), "Song");
        assert_eq!(track("  ").display_line(), "Song");
    }

    #[test]
    fn track_id_round_trips_raw_value() {
        let id = TrackId::from(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }
}
