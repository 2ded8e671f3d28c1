//! Playback engine adapter
//!
//! Abstracts the single audio primitive the player drives (an
//! `HTMLAudioElement`, a desktop output stream, a simulator). The player never
//! decodes audio; it only issues commands through [`EngineAdapter`] and reacts
//! to the [`EngineEvent`]s the host feeds back.

use serde::{Deserialize, Serialize};
use std::fmt;
use tapedeck_core::Track;
use thiserror::Error;

/// Identifier of one `play()` request
///
/// Echoed back in [`EngineEvent::PlayResolved`] so the player can tell a
/// current resolution from a stale one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayRequestId(u64);

impl PlayRequestId {
    /// Wrap a raw id
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id
    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn following(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for PlayRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why the engine refused to start playback
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PlayRejection {
    /// The environment blocks playback without a user gesture
    #[error("autoplay blocked by the environment")]
    AutoplayBlocked,

    /// The resource could not be loaded
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Anything else the primitive reported
    #[error("{0}")]
    Other(String),
}

/// Notifications from the engine, fed to [`Player::handle_engine_event`](crate::Player::handle_engine_event)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Track metadata is available
    LoadedMetadata {
        /// Track length; NaN or infinite when the primitive cannot tell
        duration_secs: f64,
    },

    /// Periodic time update
    PositionChanged {
        /// Current playback position
        position_secs: f64,
    },

    /// The loaded track played to its end
    Ended,

    /// The primitive paused on its own (platform interruption, device change)
    Paused,

    /// A `play()` request settled
    PlayResolved {
        /// The request being answered
        request: PlayRequestId,
        /// Whether playback actually started
        outcome: Result<(), PlayRejection>,
    },
}

/// Platform audio primitive
///
/// Every method is fire-and-forget except `play`, whose outcome arrives later
/// as [`EngineEvent::PlayResolved`] carrying the same `request`.
pub trait EngineAdapter {
    /// Point the primitive at a track's source
    fn load(&mut self, track: &Track);

    /// Start or resume playback of the loaded source
    fn play(&mut self, request: PlayRequestId);

    /// Pause playback
    fn pause(&mut self);

    /// Jump to an absolute position
    fn seek_to(&mut self, position_secs: f64);

    /// Set output volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    /// Current playback position
    fn current_position(&self) -> f64;

    /// Duration of the loaded source, `None` while unknown
    fn duration(&self) -> Option<f64>;
}

impl<E: EngineAdapter + ?Sized> EngineAdapter for Box<E> {
    fn load(&mut self, track: &Track) {
        (**self).load(track);
    }

    fn play(&mut self, request: PlayRequestId) {
        (**self).play(request);
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek_to(&mut self, position_secs: f64) {
        (**self).seek_to(position_secs);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn current_position(&self) -> f64 {
        (**self).current_position()
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }
}
