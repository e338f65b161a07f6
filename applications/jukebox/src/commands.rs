//! Interactive command parsing
//!
//! One line of stdin becomes one [`Command`]. Player commands map onto
//! [`JukeboxCommand`]s; the rest are answered by the front end itself.

use crate::error::{AppError, Result};
use jukebox_audio_desktop::JukeboxCommand;
use jukebox_core::TrackId;

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
    /// Seek to a percentage of the current track
    Seek(f64),
    Queue(TrackId),
    /// Remove the request at a 1-based queue position
    Decline(usize),
    Search(String),
    List,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  play              start or resume playback
  pause             pause playback
  next              skip to the next track
  prev              go back to the previous track
  stop              stop playback
  seek <percent>    jump to a position in the current track
  queue <id>        request a track by id
  decline <n>       remove the n-th request from the queue
  search <text>     find tracks by title, artist or album
  list              show the whole catalog
  status            show what is playing and the queue
  help              show this help
  quit              exit";

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "next" | "skip" => Self::Next,
            "prev" | "previous" | "back" => Self::Previous,
            "stop" => Self::Stop,
            "seek" => Self::Seek(parse_number::<f64>("seek", rest)?),
            "queue" | "request" => Self::Queue(TrackId::new(parse_number("queue", rest)?)),
            "decline" => {
                let position: usize = parse_number("decline", rest)?;
                if position == 0 {
                    return Err(AppError::InvalidCommand(
                        "queue positions start at 1".to_string(),
                    ));
                }
                Self::Decline(position)
            }
            "search" | "find" => Self::Search(rest.to_string()),
            "list" | "ls" => Self::List,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(AppError::InvalidCommand(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        };

        Ok(Some(command))
    }

    /// Driver commands that carry out this command
    ///
    /// Empty for commands the front end answers itself.
    pub fn to_jukebox(&self) -> Vec<JukeboxCommand> {
        match self {
            Self::Play => vec![JukeboxCommand::Play],
            Self::Pause => vec![JukeboxCommand::Pause],
            Self::Next => vec![JukeboxCommand::Next],
            Self::Previous => vec![JukeboxCommand::Previous],
            Self::Stop => vec![JukeboxCommand::Stop],
            Self::Seek(percent) => vec![
                JukeboxCommand::SeekBegin,
                JukeboxCommand::SeekCommit(percent / 100.0),
            ],
            Self::Queue(id) => vec![JukeboxCommand::Enqueue(*id)],
            Self::Decline(position) => vec![JukeboxCommand::Decline(position - 1)],
            Self::Search(_) | Self::List | Self::Status | Self::Help | Self::Quit => Vec::new(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(command: &str, arg: &str) -> Result<T> {
    if arg.is_empty() {
        return Err(AppError::InvalidCommand(format!(
            "'{}' needs an argument",
            command
        )));
    }

    arg.parse().map_err(|_| {
        AppError::InvalidCommand(format!("'{}' is not a valid argument for '{}'", arg, command))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn words_are_case_insensitive() {
        assert_eq!(Command::parse("PLAY").unwrap(), Some(Command::Play));
        assert_eq!(Command::parse("  Prev ").unwrap(), Some(Command::Previous));
    }

    #[test]
    fn seek_percent_becomes_a_fraction() {
        let command = Command::parse("seek 25").unwrap().unwrap();

        let sent = command.to_jukebox();
        assert_eq!(sent.len(), 2);
        assert!(matches!(sent[0], JukeboxCommand::SeekBegin));
        match sent[1] {
            JukeboxCommand::SeekCommit(fraction) => assert_eq!(fraction, 0.25),
            ref other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn decline_is_one_based() {
        let command = Command::parse("decline 1").unwrap().unwrap();

        match command.to_jukebox().as_slice() {
            [JukeboxCommand::Decline(index)] => assert_eq!(*index, 0),
            other => panic!("unexpected commands: {:?}", other),
        }
        assert!(Command::parse("decline 0").is_err());
    }

    #[test]
    fn search_keeps_the_whole_query() {
        assert_eq!(
            Command::parse("search  the blue album ").unwrap(),
            Some(Command::Search("the blue album".to_string()))
        );
    }

    #[test]
    fn missing_or_bad_arguments_are_errors() {
        assert!(Command::parse("queue").is_err());
        assert!(Command::parse("queue seven").is_err());
        assert!(Command::parse("seek").is_err());
    }

    #[test]
    fn unknown_words_are_errors() {
        let err = Command::parse("dance").unwrap_err();
        assert!(err.to_string().contains("dance"));
    }

    #[test]
    fn local_commands_send_nothing() {
        for line in ["list", "status", "help", "quit", "search x"] {
            let command = Command::parse(line).unwrap().unwrap();
            assert!(command.to_jukebox().is_empty(), "{} sent commands", line);
        }
    }
}
