//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy deciding what `next`/`previous` do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Step through the catalog in order, wrapping at both ends
    #[default]
    Normal,

    /// Restart the current track
    #[serde(alias = "repeat")]
    RepeatOne,

    /// Jump to a random other track
    Shuffle,
}

impl PlaybackMode {
    /// Next mode in the `Normal → RepeatOne → Shuffle → Normal` cycle
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            Self::Normal => Self::RepeatOne,
            Self::RepeatOne => Self::Shuffle,
            Self::Shuffle => Self::Normal,
        }
    }

    /// Previous mode in the cycle (`Normal → Shuffle → RepeatOne → Normal`)
    #[must_use]
    pub fn cycled_back(self) -> Self {
        match self {
            Self::Normal => Self::Shuffle,
            Self::Shuffle => Self::RepeatOne,
            Self::RepeatOne => Self::Normal,
        }
    }

    /// Stable lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::RepeatOne => "repeat_one",
            Self::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaybackMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "repeat" | "repeat_one" | "repeat-one" => Ok(Self::RepeatOne),
            "shuffle" => Ok(Self::Shuffle),
            other => Err(format!("unknown playback mode: {other}")),
        }
    }
}

/// Playback state machine status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// No track loaded
    Idle,

    /// Load requested, waiting for the engine to confirm playback
    Loading,

    /// Engine confirmed playback
    Playing,

    /// Paused mid-track
    Paused,
}

/// Direction for [`Player::advance`](crate::Player::advance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Forward
    Next,

    /// Backward
    Previous,
}

/// User commands accepted by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    /// Load and play the track at this catalog index
    SelectTrack(usize),
    /// Play/pause
    TogglePlayback,
    /// Advance forward
    Next,
    /// Advance backward (or restart the current track)
    Previous,
    /// Forward mode cycle
    CycleMode,
    /// Backward mode cycle, bound to the detail view's shuffle button
    ToggleShuffle,
    /// Volume in `[0, 1]`, clamped
    SetVolume(f32),
    /// Seek to a fraction of the track
    Seek(f64),
    /// Show or hide lyrics
    ToggleLyrics,
    /// Play the catalog from the first track
    StartAlbum,
    /// Leave the track detail view
    CloseTrackDetail,
}

/// Snapshot of the player state
///
/// Owned by the [`Player`](crate::Player); everyone else reads a copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Index into the catalog; valid whenever the catalog is non-empty
    pub current_index: usize,

    /// State machine status
    pub status: PlaybackStatus,

    /// Active playback mode
    pub mode: PlaybackMode,

    /// Output volume in `[0, 1]`
    pub volume: f32,

    /// Last reported position
    pub position_secs: f64,

    /// Track duration, `None` while unknown
    pub duration_secs: Option<f64>,

    /// Lyrics panel open
    pub lyrics_visible: bool,

    /// Some track has started playing this session
    pub has_started: bool,
}

impl PlaybackState {
    pub(crate) fn new(config: &PlaybackConfig) -> Self {
        Self {
            current_index: 0,
            status: PlaybackStatus::Idle,
            mode: config.mode,
            volume: config.volume.clamp(0.0, 1.0),
            position_secs: 0.0,
            duration_secs: None,
            lyrics_visible: false,
            has_started: false,
        }
    }

    /// Engine confirmed playback
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Duration when known and finite
    pub fn known_duration(&self) -> Option<f64> {
        self.duration_secs.filter(|d| d.is_finite() && *d >= 0.0)
    }
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial mode (default: Normal)
    pub mode: PlaybackMode,

    /// `previous` restarts the current track past this position (default: 3s)
    pub restart_threshold_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            mode: PlaybackMode::Normal,
            restart_threshold_secs: 3.0,
        }
    }
}
