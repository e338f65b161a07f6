//! Text rendering for the terminal front end

use jukebox_audio_desktop::JukeboxStatus;
use jukebox_core::Track;
use jukebox_playback::{JukeboxEvent, PlaybackState};
use std::fmt::Write;

/// One catalog row: id, title, artist, album
pub fn track_row(track: &Track) -> String {
    format!(
        "{:>5}  {}  |  {}  |  {}",
        track.id, track.title, track.artist, track.album
    )
}

/// Line printed for an event, if it is worth printing
///
/// Periodic progress samples are left to `status`.
pub fn event_line(event: &JukeboxEvent) -> Option<String> {
    match event {
        JukeboxEvent::TrackChanged { track, .. } => {
            Some(format!("Now playing: {}", track.display_line()))
        }
        JukeboxEvent::StateChanged {
            state: PlaybackState::Paused,
        } => Some("Paused".to_string()),
        JukeboxEvent::QueueChanged { length } => Some(match length {
            0 => "Queue is empty".to_string(),
            1 => "1 request queued".to_string(),
            n => format!("{} requests queued", n),
        }),
        JukeboxEvent::CatalogReplaced { track_count } => {
            Some(format!("Catalog loaded: {} tracks", track_count))
        }
        JukeboxEvent::EndOfPlayback => Some("Nothing left to play".to_string()),
        JukeboxEvent::Notice { message } => Some(format!("! {}", message)),
        JukeboxEvent::StateChanged { .. }
        | JukeboxEvent::CrossfadeStarted { .. }
        | JukeboxEvent::CrossfadeCompleted
        | JukeboxEvent::Progress(_) => None,
    }
}

/// Multi-line status report
pub fn status_report(status: &JukeboxStatus) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "State: {:?}", status.state);
    match &status.current {
        Some(track) => {
            let _ = writeln!(out, "Now playing: {}", track.display_line());
            let _ = writeln!(
                out,
                "Progress: {} / -{} ({:.0}%)",
                status.progress.elapsed, status.progress.remaining, status.progress.percent
            );
        }
        None => {
            let _ = writeln!(out, "Now playing: nothing");
        }
    }

    if status.queue.is_empty() {
        let _ = writeln!(out, "Queue: empty (rotation picks the next track)");
    } else {
        let _ = writeln!(out, "Queue:");
        for (position, track) in status.queue.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", position + 1, track.display_line());
        }
    }

    let _ = write!(
        out,
        "Catalog: {} tracks, history: {}",
        status.catalog_len, status.history_len
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jukebox_core::{TrackId, UNKNOWN_ARTIST};
    use jukebox_playback::ProgressSnapshot;
    use std::path::PathBuf;

    fn track(id: u32, title: &str, artist: &str) -> Track {
        Track::new(
            TrackId::new(id),
            title,
            artist,
            "Album",
            PathBuf::from(format!("/music/{}.mp3", title)),
        )
    }

    #[test]
    fn now_playing_uses_display_line() {
        let event = JukeboxEvent::TrackChanged {
            track: track(1, "Intro", "Band"),
            previous_track_id: None,
        };

        assert_eq!(event_line(&event).unwrap(), "Now playing: Intro - Band");
    }

    #[test]
    fn unknown_artist_is_hidden() {
        let event = JukeboxEvent::TrackChanged {
            track: track(1, "Loose", UNKNOWN_ARTIST),
            previous_track_id: Some(TrackId::new(0)),
        };

        assert_eq!(event_line(&event).unwrap(), "Now playing: Loose");
    }

    #[test]
    fn progress_is_not_printed() {
        assert!(event_line(&JukeboxEvent::Progress(ProgressSnapshot::zero())).is_none());
        assert!(event_line(&JukeboxEvent::CrossfadeCompleted).is_none());
    }

    #[test]
    fn notices_are_marked() {
        let event = JukeboxEvent::Notice {
            message: "Skipping broken.mp3".to_string(),
        };

        assert_eq!(event_line(&event).unwrap(), "! Skipping broken.mp3");
    }

    #[test]
    fn status_lists_the_queue_in_order() {
        let status = JukeboxStatus {
            state: PlaybackState::Playing,
            current: Some(track(0, "First", "Band")),
            progress: ProgressSnapshot::zero(),
            queue: vec![track(2, "Second", "Band"), track(5, "Third", "Band")],
            history_len: 1,
            catalog_len: 6,
        };

        let report = status_report(&status);

        assert!(report.contains("Now playing: First - Band"));
        let second = report.find("1. Second").unwrap();
        let third = report.find("2. Third").unwrap();
        assert!(second < third);
        assert!(report.contains("Catalog: 6 tracks"));
    }

    #[test]
    fn idle_status_says_nothing_is_playing() {
        let report = status_report(&JukeboxStatus::default());

        assert!(report.contains("State: Idle"));
        assert!(report.contains("Now playing: nothing"));
        assert!(report.contains("Queue: empty"));
    }

    #[test]
    fn rows_show_every_field() {
        let row = track_row(&track(12, "Song", "Band"));

        assert!(row.contains("12"));
        assert!(row.contains("Song"));
        assert!(row.contains("Band"));
        assert!(row.contains("Album"));
    }
}
