//! View synchronization
//!
//! Pure projection from a [`PlaybackState`] snapshot to the display fields of
//! every surface (mini-bar, full overlay, track detail). The projection is
//! total and idempotent: it is recomputed in full after every transition and
//! the rendering layer decides what actually needs redrawing.

use crate::types::{PlaybackMode, PlaybackState, PlaybackStatus};
use serde::{Deserialize, Serialize};
use tapedeck_core::{Track, TrackId};

/// Render seconds as `m:ss`
///
/// Truncates to whole seconds. NaN, infinite and negative inputs render as
/// `0:00`.
///
/// ```
/// use tapedeck_playback::view::format_time;
///
/// assert_eq!(format_time(125.7), "2:05");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Asset references used by the surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Cover shown for tracks without their own
    pub default_cover: String,
    /// Play button icon (shown while not playing)
    pub play_icon: String,
    /// Pause button icon (shown while playing)
    pub pause_icon: String,
    /// Mode button icon in `Normal`
    pub normal_icon: String,
    /// Mode button icon in `RepeatOne`
    pub repeat_one_icon: String,
    /// Mode button icon in `Shuffle`
    pub shuffle_icon: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_cover: "assets/covers/default.jpg".to_string(),
            play_icon: "assets/icons/play.svg".to_string(),
            pause_icon: "assets/icons/pause.svg".to_string(),
            normal_icon: "assets/icons/repeat.svg".to_string(),
            repeat_one_icon: "assets/icons/repeat-one.svg".to_string(),
            shuffle_icon: "assets/icons/shuffle.svg".to_string(),
        }
    }
}

impl ViewConfig {
    /// Icon for the mode button
    pub fn mode_icon(&self, mode: PlaybackMode) -> &str {
        match mode {
            PlaybackMode::Normal => &self.normal_icon,
            PlaybackMode::RepeatOne => &self.repeat_one_icon,
            PlaybackMode::Shuffle => &self.shuffle_icon,
        }
    }

    /// Icon for the play/pause button
    pub fn playback_icon(&self, is_playing: bool) -> &str {
        if is_playing {
            &self.pause_icon
        } else {
            &self.play_icon
        }
    }
}

/// Everything the surfaces display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPayload {
    pub track_id: Option<TrackId>,
    pub track_index: usize,
    pub title: String,
    pub artist: String,
    pub cover_ref: String,
    pub is_playing: bool,
    pub status: PlaybackStatus,
    pub play_icon_ref: String,
    pub position_formatted: String,
    pub duration_formatted: String,
    /// Elapsed share of the track in `[0, 100]`; 0 while the duration is unknown
    pub progress_percent: f64,
    pub mode: PlaybackMode,
    pub mode_icon_ref: String,
    pub shuffle_active: bool,
    pub volume: f32,
    /// Lyrics of the current track while the lyrics panel is open
    pub lyrics: Option<String>,
    /// The mini-bar appears with the first started track and stays
    pub mini_bar_visible: bool,
}

/// Project state onto the surfaces
///
/// `track` is the catalog entry at `state.current_index`, `None` only for an
/// empty catalog. `lyrics` is shown only while `state.lyrics_visible`.
pub fn project(
    state: &PlaybackState,
    track: Option<&Track>,
    lyrics: Option<&str>,
    config: &ViewConfig,
) -> ViewPayload {
    let is_playing = state.is_playing();
    let duration = state.known_duration();

    let progress_percent = match duration {
        Some(d) if d > 0.0 => (state.position_secs / d * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    };

    let cover_ref = track
        .and_then(|t| t.cover.clone())
        .unwrap_or_else(|| config.default_cover.clone());

    ViewPayload {
        track_id: track.map(|t| t.id),
        track_index: state.current_index,
        title: track.map(|t| t.title.clone()).unwrap_or_default(),
        artist: track.map(|t| t.artist.clone()).unwrap_or_default(),
        cover_ref,
        is_playing,
        status: state.status,
        play_icon_ref: config.playback_icon(is_playing).to_string(),
        position_formatted: format_time(state.position_secs),
        duration_formatted: duration.map_or_else(|| format_time(f64::NAN), format_time),
        progress_percent,
        mode: state.mode,
        mode_icon_ref: config.mode_icon(state.mode).to_string(),
        shuffle_active: state.mode == PlaybackMode::Shuffle,
        volume: state.volume,
        lyrics: lyrics
            .filter(|_| state.lyrics_visible)
            .map(str::to_string),
        mini_bar_visible: state.has_started,
    }
}
