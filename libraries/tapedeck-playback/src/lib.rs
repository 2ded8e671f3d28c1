//! Tapedeck - Playback Management
//!
//! Platform-agnostic playback state machine and view synchronization for
//! Tapedeck.
//!
//! This crate provides:
//! - Playback state machine (`Idle → Loading → Playing ⇄ Paused`)
//! - Playback modes (Normal, RepeatOne, Shuffle)
//! - "Previous" restarts the current track past 3 seconds
//! - Volume control (linear, clamped to 0.0-1.0)
//! - Seek by fraction of the track
//! - Lyrics lookup by title
//! - A pure view projection shared by every surface
//!
//! # Architecture
//!
//! `tapedeck-playback` never touches audio itself:
//! - The platform audio primitive sits behind [`EngineAdapter`]
//! - Engine notifications come back as [`EngineEvent`]s
//! - State changes go out as [`PlaybackEvent`]s carrying a full [`ViewPayload`]
//!
//! `play()` is asynchronous on every platform: the player marks the request
//! pending, waits for [`EngineEvent::PlayResolved`], and only then reports the
//! track as playing. Resolutions for superseded requests are discarded.
//!
//! # Example
//!
//! ```rust
//! use tapedeck_core::{Catalog, Track, TrackId};
//! use tapedeck_playback::{
//!     EngineAdapter, EngineEvent, PlayRequestId, PlaybackConfig, PlaybackEvent, Player,
//! };
//!
//! // Implement EngineAdapter for your platform
//! #[derive(Default)]
//! struct SilentEngine {
//!     last_request: Option<PlayRequestId>,
//! }
//!
//! impl EngineAdapter for SilentEngine {
//!     fn load(&mut self, _track: &Track) {}
//!     fn play(&mut self, request: PlayRequestId) {
//!         self.last_request = Some(request);
//!     }
//!     fn pause(&mut self) {}
//!     fn seek_to(&mut self, _position_secs: f64) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn current_position(&self) -> f64 {
//!         0.0
//!     }
//!     fn duration(&self) -> Option<f64> {
//!         None
//!     }
//! }
//!
//! let catalog = Catalog::new(vec![
//!     Track::new(TrackId::new(1), "basement", "Kai Angel", "Music/basement.mp3"),
//!     Track::new(TrackId::new(2), "mirrors", "Kai Angel", "Music/mirrors.mp3"),
//! ])
//! .unwrap();
//!
//! let mut player = Player::new(catalog, SilentEngine::default(), PlaybackConfig::default());
//!
//! player.select_track(1);
//! assert!(!player.is_playing()); // waiting for the engine
//!
//! let request = player.engine().last_request.unwrap();
//! player.handle_engine_event(EngineEvent::PlayResolved {
//!     request,
//!     outcome: Ok(()),
//! });
//! assert!(player.is_playing());
//!
//! for event in player.drain_events() {
//!     if let PlaybackEvent::StateChanged { payload } = event {
//!         println!("{} - {} [{}]", payload.artist, payload.title, payload.position_formatted);
//!     }
//! }
//! ```

mod engine;
mod error;
mod events;
mod lyrics;
mod manager;
mod shuffle;
pub mod types;
pub mod view;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use engine::{EngineAdapter, EngineEvent, PlayRejection, PlayRequestId};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use lyrics::{placeholder as lyrics_placeholder, LyricsBook, LyricsLookup};
pub use manager::{PendingPlay, PlayKind, Player};
pub use shuffle::{pick_other_index, IndexSource, SeededSource, ThreadRngSource};
pub use types::{
    Command, Direction, PlaybackConfig, PlaybackMode, PlaybackState, PlaybackStatus,
};
pub use view::{format_time, ViewConfig, ViewPayload};
pub use volume::Volume;
