//! Simulated audio engine
//!
//! Stands in for a real audio element in the terminal host. Time only moves
//! when [`SimulatedEngine::advance`] is called; each call returns the
//! notifications a browser audio element would have fired in that span.
//! `play()` requests settle on the next advance, never synchronously.

use crate::config::SimulationSettings;
use std::collections::HashMap;
use tapedeck_core::{Track, TrackId};
use tapedeck_playback::{EngineAdapter, EngineEvent, PlayRejection, PlayRequestId};
use tracing::debug;

#[derive(Debug, Clone)]
struct LoadedSource {
    track_id: TrackId,
    locator: String,
    duration_secs: f64,
    metadata_reported: bool,
}

impl LoadedSource {
    fn is_available(&self) -> bool {
        !self.locator.trim().is_empty()
    }
}

/// Engine adapter driven by a virtual clock
#[derive(Debug)]
pub struct SimulatedEngine {
    durations: HashMap<TrackId, f64>,
    default_duration_secs: f64,
    block_autoplay: bool,
    autoplay_unlocked: bool,

    loaded: Option<LoadedSource>,
    position_secs: f64,
    playing: bool,
    volume: f32,

    // Play requests waiting for the next advance
    pending: Vec<PlayRequestId>,
    // Requests cut short by a new load
    interrupted: Vec<PlayRequestId>,
}

impl SimulatedEngine {
    /// Create an engine with per-track lengths
    pub fn new(settings: &SimulationSettings, durations: HashMap<TrackId, f64>) -> Self {
        Self {
            durations,
            default_duration_secs: settings.default_duration_secs,
            block_autoplay: settings.block_autoplay,
            autoplay_unlocked: false,
            loaded: None,
            position_secs: 0.0,
            playing: false,
            volume: 1.0,
            pending: Vec::new(),
            interrupted: Vec::new(),
        }
    }

    /// Whether audio is currently advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Last volume set by the player
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Track currently loaded
    pub fn loaded_track(&self) -> Option<TrackId> {
        self.loaded.as_ref().map(|l| l.track_id)
    }

    /// Move the clock forward by `dt_secs` and report what happened
    pub fn advance(&mut self, dt_secs: f64) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        for request in self.interrupted.drain(..) {
            events.push(EngineEvent::PlayResolved {
                request,
                outcome: Err(PlayRejection::Other(
                    "play() request was interrupted by a new load".to_string(),
                )),
            });
        }

        if let Some(loaded) = self.loaded.as_mut() {
            if loaded.is_available() && !loaded.metadata_reported {
                loaded.metadata_reported = true;
                events.push(EngineEvent::LoadedMetadata {
                    duration_secs: loaded.duration_secs,
                });
            }
        }

        if self.playing {
            let duration = self.loaded.as_ref().map_or(0.0, |l| l.duration_secs);
            self.position_secs = (self.position_secs + dt_secs).min(duration);
            events.push(EngineEvent::PositionChanged {
                position_secs: self.position_secs,
            });

            if self.position_secs >= duration {
                self.playing = false;
                events.push(EngineEvent::Ended);
            }
        }

        for request in std::mem::take(&mut self.pending) {
            let outcome = self.start(request);
            events.push(EngineEvent::PlayResolved { request, outcome });
        }

        events
    }

    fn start(&mut self, request: PlayRequestId) -> Result<(), PlayRejection> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Err(PlayRejection::SourceUnavailable("no source loaded".to_string()));
        };
        if !loaded.is_available() {
            return Err(PlayRejection::SourceUnavailable(format!(
                "track {} has no source",
                loaded.track_id
            )));
        }
        if self.block_autoplay && !self.autoplay_unlocked {
            // The rejected attempt counts as the user's first interaction
            self.autoplay_unlocked = true;
            debug!(%request, "blocking autoplay");
            return Err(PlayRejection::AutoplayBlocked);
        }

        self.playing = true;
        Ok(())
    }
}

impl EngineAdapter for SimulatedEngine {
    fn load(&mut self, track: &Track) {
        self.interrupted.append(&mut self.pending);
        self.loaded = Some(LoadedSource {
            track_id: track.id,
            locator: track.source.as_str().to_string(),
            duration_secs: self
                .durations
                .get(&track.id)
                .copied()
                .unwrap_or(self.default_duration_secs),
            metadata_reported: false,
        });
        self.position_secs = 0.0;
        self.playing = false;
    }

    fn play(&mut self, request: PlayRequestId) {
        self.pending.push(request);
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_to(&mut self, position_secs: f64) {
        let duration = self.loaded.as_ref().map_or(0.0, |l| l.duration_secs);
        self.position_secs = position_secs.clamp(0.0, duration);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn current_position(&self) -> f64 {
        self.position_secs
    }

    fn duration(&self) -> Option<f64> {
        self.loaded
            .as_ref()
            .filter(|l| l.metadata_reported)
            .map(|l| l.duration_secs)
    }
}
