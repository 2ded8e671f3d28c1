//! Terminal input parsing
//!
//! One command per line. Keyboard names (`space`, `ctrl+right`, `ctrl+left`)
//! are accepted alongside short aliases.

use crate::error::{CliError, Result};
use tapedeck_playback::Command;

/// Help text printed by `help`
pub const HELP: &str = "\
commands:
  space | toggle | p        play/pause
  next | n | > | ctrl+right next track
  prev | b | < | ctrl+left  previous track (restarts past 3s)
  select <n> | <n>          play track n (1-based)
  album                     play from the first track
  mode | m                  cycle normal -> repeat one -> shuffle
  shuffle                   cycle normal -> shuffle -> repeat one
  vol <0..1>                set volume
  seek <0..1 | n%>          seek within the track
  lyrics | l                show/hide lyrics
  back                      close the track detail view
  status | s                print the current state
  tracks                    list tracks
  help | ?                  this text
  quit | q                  exit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Forward to the player
    Command(Command),
    /// Print the current view payload
    Status,
    /// List the catalog
    Tracks,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_input(line: &str) -> Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_ascii_lowercase();
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(CliError::Input(format!("unexpected argument: {extra}")));
    }

    let input = match (head.as_str(), arg) {
        ("space" | "toggle" | "p" | "play" | "pause", None) => {
            Input::Command(Command::TogglePlayback)
        }
        ("next" | "n" | ">" | "ctrl+right", None) => Input::Command(Command::Next),
        ("prev" | "previous" | "b" | "<" | "ctrl+left", None) => {
            Input::Command(Command::Previous)
        }
        ("select" | "play", Some(n)) => Input::Command(Command::SelectTrack(track_index(n)?)),
        (n, None) if n.chars().all(|c| c.is_ascii_digit()) => {
            Input::Command(Command::SelectTrack(track_index(n)?))
        }
        ("album" | "start", None) => Input::Command(Command::StartAlbum),
        ("mode" | "m", None) => Input::Command(Command::CycleMode),
        ("shuffle", None) => Input::Command(Command::ToggleShuffle),
        ("vol" | "volume", Some(level)) => Input::Command(Command::SetVolume(
            level
                .parse()
                .map_err(|_| CliError::Input(format!("invalid volume: {level}")))?,
        )),
        ("seek", Some(target)) => Input::Command(Command::Seek(seek_fraction(target)?)),
        ("lyrics" | "l", None) => Input::Command(Command::ToggleLyrics),
        ("back" | "close", None) => Input::Command(Command::CloseTrackDetail),
        ("status" | "s", None) => Input::Status,
        ("tracks" | "list", None) => Input::Tracks,
        ("help" | "?", None) => Input::Help,
        ("quit" | "q" | "exit", None) => Input::Quit,
        _ => return Err(CliError::Input(format!("unknown command: {line}"))),
    };

    Ok(Some(input))
}

/// 1-based track number to catalog index
fn track_index(number: &str) -> Result<usize> {
    match number.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CliError::Input(format!(
            "track numbers start at 1, got {number}"
        ))),
    }
}

/// `0.25` or `25%`
fn seek_fraction(target: &str) -> Result<f64> {
    let invalid = || CliError::Input(format!("invalid seek target: {target}"));

    match target.strip_suffix('%') {
        Some(percent) => percent
            .parse::<f64>()
            .map(|p| p / 100.0)
            .map_err(|_| invalid()),
        None => target.parse::<f64>().map_err(|_| invalid()),
    }
}
