//! File scanning for audio files

use crate::{LibraryError, Result};
use jukebox_core::{Catalog, Track, TrackId, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use serde::Deserialize;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Extensions picked up when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav"];

/// Options controlling directory enumeration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to include, matched case-insensitively
    pub extensions: Vec<String>,

    /// Whether to follow symbolic links
    pub follow_links: bool,

    /// Whether dot-files and dot-directories are scanned
    pub include_hidden: bool,

    /// Maximum directory depth to traverse (`None` for unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            follow_links: false,
            include_hidden: false,
            max_depth: None,
        }
    }
}

impl ScanConfig {
    /// Create a scan configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension filter
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set whether hidden entries are scanned
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        is_audio_file(path, &self.extensions)
    }
}

/// Scan a directory tree and build a catalog from the audio files found
///
/// Entries are visited in file-name order so the same tree always yields the
/// same ids. A tree without audio files produces an empty catalog.
pub fn scan_directory(root: &Path, config: &ScanConfig) -> Result<Catalog> {
    if !root.exists() {
        return Err(LibraryError::NotFound(root.to_path_buf()));
    }

    if !root.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }

    // Surface an unreadable root instead of silently returning nothing
    std::fs::read_dir(root).map_err(|source| LibraryError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name();

    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let include_hidden = config.include_hidden;
    let mut tracks = Vec::new();

    for entry in walker
        .into_iter()
        .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(LibraryError::Walk(e)),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !config.accepts(path) {
            continue;
        }

        let Ok(raw_id) = u32::try_from(tracks.len()) else {
            tracing::warn!("Track limit reached, ignoring the rest of {}", root.display());
            break;
        };

        tracks.push(track_from_path(TrackId::new(raw_id), root, path));
    }

    tracing::info!("Found {} tracks in {}", tracks.len(), root.display());

    Ok(Catalog::new(tracks))
}

/// Check if a file has one of the given extensions (case-insensitive)
pub fn is_audio_file<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.as_ref().eq_ignore_ascii_case(ext))
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Derive track metadata from its place in the tree
///
/// Files directly inside the root get the unknown sentinels; anything deeper
/// takes artist and album from the immediate parent folder.
fn track_from_path(id: TrackId, root: &Path, path: &Path) -> Track {
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let folder = path
        .parent()
        .filter(|parent| *parent != root)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());

    let (artist, album) = match folder {
        Some(name) => (name.clone(), name),
        None => (UNKNOWN_ARTIST.to_string(), UNKNOWN_ALBUM.to_string()),
    };

    Track::new(id, title, artist, album, path)
}
