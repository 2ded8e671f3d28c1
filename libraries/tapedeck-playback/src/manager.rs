//! Player - playback state machine
//!
//! Owns the current-track index, mode and play/pause status, drives the engine
//! adapter, and queues a fresh view payload after every transition.

use crate::{
    engine::{EngineAdapter, EngineEvent, PlayRejection, PlayRequestId},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    lyrics::{LyricsBook, LyricsLookup},
    shuffle::{pick_other_index, IndexSource, ThreadRngSource},
    types::{Command, Direction, PlaybackConfig, PlaybackMode, PlaybackState, PlaybackStatus},
    view::{self, ViewConfig, ViewPayload},
    volume::Volume,
};
use tapedeck_core::{Catalog, Track};
use tracing::{debug, warn};

/// What an in-flight `play()` is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayKind {
    /// Start of a freshly loaded track; rejection falls back to `Idle`
    Load,
    /// Resume or restart of the loaded track; rejection falls back to `Paused`
    Resume,
}

/// The `play()` request the player is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPlay {
    pub request: PlayRequestId,
    pub index: usize,
    pub kind: PlayKind,
}

/// Playback state machine
///
/// Single-threaded: every command and engine event runs to completion before
/// the next. The host owns the player, calls commands on user input, forwards
/// [`EngineEvent`]s, and drains [`PlaybackEvent`]s for rendering.
pub struct Player<E> {
    catalog: Catalog,
    engine: E,
    state: PlaybackState,
    volume: Volume,
    restart_threshold_secs: f64,

    // In-flight play request and the last id handed out
    pending_play: Option<PendingPlay>,
    last_request: PlayRequestId,

    shuffle_source: Box<dyn IndexSource>,
    lyrics: Box<dyn LyricsLookup>,
    view_config: ViewConfig,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<E: EngineAdapter> Player<E> {
    /// Create a player at the first track, idle
    pub fn new(catalog: Catalog, mut engine: E, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        engine.set_volume(volume.level());

        let mut state = PlaybackState::new(&config);
        state.volume = volume.level();

        let restart_threshold_secs =
            if config.restart_threshold_secs.is_finite() && config.restart_threshold_secs >= 0.0 {
                config.restart_threshold_secs
            } else {
                PlaybackConfig::default().restart_threshold_secs
            };

        Self {
            catalog,
            engine,
            state,
            volume,
            restart_threshold_secs,
            pending_play: None,
            last_request: PlayRequestId::new(0),
            shuffle_source: Box::new(ThreadRngSource),
            lyrics: Box::new(LyricsBook::new()),
            view_config: ViewConfig::default(),
            pending_events: Vec::new(),
        }
    }

    /// Replace the shuffle randomness source
    #[must_use]
    pub fn with_shuffle_source(mut self, source: impl IndexSource + 'static) -> Self {
        self.shuffle_source = Box::new(source);
        self
    }

    /// Replace the lyrics lookup
    #[must_use]
    pub fn with_lyrics(mut self, lyrics: impl LyricsLookup + 'static) -> Self {
        self.lyrics = Box::new(lyrics);
        self
    }

    /// Replace the view asset configuration
    #[must_use]
    pub fn with_view_config(mut self, config: ViewConfig) -> Self {
        self.view_config = config;
        self
    }

    // ===== Commands =====

    /// Dispatch a [`Command`]
    pub fn apply(&mut self, command: Command) {
        debug!(?command, "applying command");

        match command {
            Command::SelectTrack(index) => self.select_track(index),
            Command::TogglePlayback => self.toggle_playback(),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::CycleMode => self.cycle_mode(),
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::SetVolume(level) => self.set_volume(level),
            Command::Seek(fraction) => self.seek(fraction),
            Command::ToggleLyrics => self.toggle_lyrics(),
            Command::StartAlbum => self.start_album(),
            Command::CloseTrackDetail => self.close_track_detail(),
        }
    }

    /// Load and play the track at `index`
    ///
    /// Supersedes any pending play for another track. Out-of-range indices are
    /// ignored.
    pub fn select_track(&mut self, index: usize) {
        let result = self.load_and_play(index);
        Self::absorb(result);
    }

    /// Play/pause
    ///
    /// From `Idle` this loads the current track. Ignored while a play request
    /// is in flight.
    pub fn toggle_playback(&mut self) {
        if let Some(pending) = self.pending_play {
            debug!(request = %pending.request, "toggle ignored while play is pending");
            return;
        }

        let result = match self.state.status {
            PlaybackStatus::Idle | PlaybackStatus::Loading => {
                self.load_and_play(self.state.current_index)
            }
            PlaybackStatus::Paused => {
                self.request_play(self.state.current_index, PlayKind::Resume);
                Ok(())
            }
            PlaybackStatus::Playing => {
                self.engine.pause();
                self.state.status = PlaybackStatus::Paused;
                self.publish();
                Ok(())
            }
        };
        Self::absorb(result);
    }

    /// Skip to next track
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.advance(Direction::Next);
    }

    /// Go to previous track
    ///
    /// Past the restart threshold (3 seconds by default) this restarts the
    /// current track instead, in every mode.
    pub fn previous(&mut self) {
        self.advance(Direction::Previous);
    }

    /// Move through the catalog according to the current mode
    pub fn advance(&mut self, direction: Direction) {
        let result = self.try_advance(direction);
        Self::absorb(result);
    }

    /// Forward mode cycle (`Normal → RepeatOne → Shuffle`)
    pub fn cycle_mode(&mut self) {
        self.set_mode(self.state.mode.cycled());
    }

    /// Backward mode cycle (`Normal → Shuffle → RepeatOne`)
    pub fn toggle_shuffle(&mut self) {
        self.set_mode(self.state.mode.cycled_back());
    }

    /// Set volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, level: f32) {
        match self.volume.set_level(level) {
            Some(applied) => {
                self.engine.set_volume(applied);
                self.state.volume = applied;
                self.publish();
            }
            None => warn!(level, "ignoring NaN volume"),
        }
    }

    /// Seek to `fraction` (clamped to `[0, 1]`) of the current track
    ///
    /// Ignored while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) {
        let result = self.try_seek(fraction);
        Self::absorb(result);
    }

    /// Show or hide lyrics
    pub fn toggle_lyrics(&mut self) {
        self.state.lyrics_visible = !self.state.lyrics_visible;
        self.publish();
    }

    /// Play the catalog from its first track
    pub fn start_album(&mut self) {
        self.select_track(0);
    }

    /// Leave the track detail view, hiding lyrics
    pub fn close_track_detail(&mut self) {
        if self.state.lyrics_visible {
            self.state.lyrics_visible = false;
            self.publish();
        }
    }

    // ===== Engine events =====

    /// Feed a notification from the engine
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::LoadedMetadata { duration_secs } => {
                self.state.duration_secs =
                    (duration_secs.is_finite() && duration_secs >= 0.0).then_some(duration_secs);
                self.publish();
            }
            EngineEvent::PositionChanged { position_secs } => {
                self.state.position_secs = if position_secs.is_finite() {
                    position_secs.max(0.0)
                } else {
                    0.0
                };
                self.publish();
            }
            EngineEvent::Ended => self.on_track_ended(),
            EngineEvent::Paused => {
                if self.state.status == PlaybackStatus::Playing {
                    debug!("engine paused on its own");
                    self.state.status = PlaybackStatus::Paused;
                    self.publish();
                }
            }
            EngineEvent::PlayResolved { request, outcome } => self.resolve_play(request, outcome),
        }
    }

    /// The loaded track played to its end
    ///
    /// `RepeatOne` restarts it; every other mode advances as `next` would.
    pub fn on_track_ended(&mut self) {
        if let Some(pending) = self.pending_play {
            debug!(request = %pending.request, "ignoring end of track while play is pending");
            return;
        }
        if self.state.status == PlaybackStatus::Idle {
            debug!("ignoring end of track while idle");
            return;
        }

        if self.state.mode == PlaybackMode::RepeatOne {
            self.engine.seek_to(0.0);
            self.state.position_secs = 0.0;
            self.state.status = PlaybackStatus::Paused;
            self.request_play(self.state.current_index, PlayKind::Resume);
            self.publish();
        } else {
            self.advance(Direction::Next);
        }
    }

    // ===== State queries =====

    /// Current state snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Current status
    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    /// Current mode
    pub fn mode(&self) -> PlaybackMode {
        self.state.mode
    }

    /// Engine confirmed playback
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Track at the current index (`None` only for an empty catalog)
    pub fn current_track(&self) -> Option<&Track> {
        self.catalog.get(self.state.current_index)
    }

    /// The catalog the player was built with
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The engine adapter
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine adapter, mutably (hosts that pump the engine themselves)
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The play request currently in flight
    pub fn pending_play(&self) -> Option<PendingPlay> {
        self.pending_play
    }

    /// Position past which `previous` restarts the current track
    pub fn restart_threshold_secs(&self) -> f64 {
        self.restart_threshold_secs
    }

    /// Project the current state for the surfaces
    pub fn view(&self) -> ViewPayload {
        let track = self.current_track();
        let lyrics = if self.state.lyrics_visible {
            track.map(|t| self.lyrics.lookup_lyrics(&t.title))
        } else {
            None
        };

        view::project(&self.state, track, lyrics.as_deref(), &self.view_config)
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been queued since the last drain.
    /// Call this regularly (e.g., after every command or engine event).
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn load_and_play(&mut self, index: usize) -> Result<()> {
        let len = self.catalog.len();
        if len == 0 {
            return Err(PlaybackError::EmptyCatalog);
        }
        let Some(track) = self.catalog.get(index) else {
            return Err(PlaybackError::InvalidIndex { index, len });
        };

        if let Some(pending) = self.pending_play {
            if pending.kind == PlayKind::Load && pending.index == index {
                debug!(index, request = %pending.request, "load already pending");
                return Ok(());
            }
            debug!(superseded = %pending.request, index, "superseding pending play");
        }

        debug!(index, track_id = %track.id, title = %track.title, "loading track");
        self.engine.load(track);

        self.state.current_index = index;
        self.state.position_secs = 0.0;
        self.state.duration_secs = None;
        self.state.status = PlaybackStatus::Loading;

        self.request_play(index, PlayKind::Load);
        self.publish();
        Ok(())
    }

    fn request_play(&mut self, index: usize, kind: PlayKind) {
        let request = self.last_request.following();
        self.last_request = request;
        self.pending_play = Some(PendingPlay {
            request,
            index,
            kind,
        });
        self.engine.play(request);
    }

    fn resolve_play(
        &mut self,
        request: PlayRequestId,
        outcome: std::result::Result<(), PlayRejection>,
    ) {
        let Some(pending) = self.pending_play else {
            debug!(%request, "discarding play resolution with nothing pending");
            return;
        };
        if pending.request != request || pending.index != self.state.current_index {
            debug!(%request, pending = %pending.request, "discarding stale play resolution");
            return;
        }
        self.pending_play = None;

        match outcome {
            Ok(()) => {
                debug!(%request, index = pending.index, "playback started");
                self.state.status = PlaybackStatus::Playing;
                self.state.has_started = true;
                self.publish();
            }
            Err(reason) => {
                self.state.status = match pending.kind {
                    PlayKind::Load => PlaybackStatus::Idle,
                    PlayKind::Resume => PlaybackStatus::Paused,
                };
                self.publish();

                let error = PlaybackError::PlaybackRejected {
                    index: pending.index,
                    reason: reason.clone(),
                };
                warn!(%error, "engine refused to play");

                if let Some(track) = self.catalog.get(pending.index) {
                    self.pending_events.push(PlaybackEvent::PlaybackRejected {
                        track_id: track.id,
                        reason,
                    });
                }
            }
        }
    }

    fn try_advance(&mut self, direction: Direction) -> Result<()> {
        let len = self.catalog.len();
        if len == 0 {
            return Err(PlaybackError::EmptyCatalog);
        }

        if direction == Direction::Previous
            && self.engine.current_position() > self.restart_threshold_secs
        {
            self.restart_in_place();
            return Ok(());
        }

        let current = self.state.current_index;
        let target = match self.state.mode {
            PlaybackMode::Normal => match direction {
                Direction::Next => (current + 1) % len,
                Direction::Previous => (current + len - 1) % len,
            },
            PlaybackMode::RepeatOne => {
                self.restart_in_place();
                return Ok(());
            }
            PlaybackMode::Shuffle => pick_other_index(self.shuffle_source.as_mut(), len, current),
        };

        self.load_and_play(target)
    }

    /// Seek back to 0 without reloading; a playing track keeps playing
    fn restart_in_place(&mut self) {
        debug!(index = self.state.current_index, "restarting track");
        self.engine.seek_to(0.0);
        self.state.position_secs = 0.0;
        self.publish();
    }

    fn try_seek(&mut self, fraction: f64) -> Result<()> {
        let duration = self
            .state
            .known_duration()
            .or_else(|| self.engine.duration().filter(|d| d.is_finite() && *d >= 0.0))
            .ok_or(PlaybackError::SeekUnavailable)?;

        if fraction.is_nan() {
            debug!("ignoring NaN seek fraction");
            return Ok(());
        }

        let position = fraction.clamp(0.0, 1.0) * duration;
        self.engine.seek_to(position);
        self.state.position_secs = position;
        self.publish();
        Ok(())
    }

    fn set_mode(&mut self, mode: PlaybackMode) {
        debug!(from = %self.state.mode, to = %mode, "mode changed");
        self.state.mode = mode;
        self.publish();
    }

    /// Log an error a command could not apply; commands never propagate them
    fn absorb(result: Result<()>) {
        match result {
            Ok(()) => {}
            Err(error @ PlaybackError::InvalidIndex { .. }) => warn!(%error, "command ignored"),
            Err(error) => debug!(%error, "command ignored"),
        }
    }

    fn publish(&mut self) {
        let payload = self.view();
        self.pending_events.push(PlaybackEvent::StateChanged { payload });
    }
}
