//! Shared helpers for player tests

use tapedeck_core::{Catalog, Track, TrackId};
use tapedeck_playback::{
    EngineAdapter, EngineEvent, PlayRejection, PlayRequestId, PlaybackConfig, PlaybackEvent,
    Player, SeededSource, ViewPayload,
};

/// Everything the player asked the engine to do
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Load(TrackId),
    Play(PlayRequestId),
    Pause,
    SeekTo(f64),
    SetVolume(f32),
}

/// Engine that records calls and lets tests script position and duration
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub position: f64,
    pub duration: Option<f64>,
}

impl RecordingEngine {
    pub fn loads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Load(_)))
            .count()
    }

    pub fn plays(&self) -> Vec<PlayRequestId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Play(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    pub fn last_seek(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|c| match c {
            EngineCall::SeekTo(position) => Some(*position),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl EngineAdapter for RecordingEngine {
    fn load(&mut self, track: &Track) {
        self.calls.push(EngineCall::Load(track.id));
        self.position = 0.0;
        self.duration = None;
    }

    fn play(&mut self, request: PlayRequestId) {
        self.calls.push(EngineCall::Play(request));
    }

    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
    }

    fn seek_to(&mut self, position_secs: f64) {
        self.calls.push(EngineCall::SeekTo(position_secs));
        self.position = position_secs;
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(EngineCall::SetVolume(volume));
    }

    fn current_position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

pub const TITLES: [&str; 5] = ["are you happy", "basement", "mirrors", "damage", "444"];

pub fn catalog(len: usize) -> Catalog {
    let tracks = (0..len)
        .map(|i| {
            let title = TITLES
                .get(i)
                .map_or_else(|| format!("track {}", i + 1), |t| (*t).to_string());
            Track::new(
                TrackId::new(i as u32 + 1),
                title.clone(),
                "Kai Angel",
                format!("Music/Kai Angel - {}.mp3", title),
            )
        })
        .collect();
    Catalog::new(tracks).unwrap()
}

pub fn player(len: usize) -> Player<RecordingEngine> {
    player_with(len, PlaybackConfig::default())
}

pub fn player_with(len: usize, config: PlaybackConfig) -> Player<RecordingEngine> {
    Player::new(catalog(len), RecordingEngine::default(), config)
        .with_shuffle_source(SeededSource::new(0x7a9e_d3c4))
}

/// Resolve the pending play request
pub fn resolve(player: &mut Player<RecordingEngine>, outcome: Result<(), PlayRejection>) {
    let request = player
        .pending_play()
        .expect("a play request should be pending")
        .request;
    player.handle_engine_event(EngineEvent::PlayResolved { request, outcome });
}

pub fn confirm(player: &mut Player<RecordingEngine>) {
    resolve(player, Ok(()));
}

/// Select `index`, confirm playback, report metadata, and clear recorded calls
pub fn start(player: &mut Player<RecordingEngine>, index: usize, duration_secs: f64) {
    player.select_track(index);
    confirm(player);
    player.engine_mut().duration = Some(duration_secs);
    player.handle_engine_event(EngineEvent::LoadedMetadata { duration_secs });
    player.engine_mut().clear();
    player.drain_events();
}

/// Report a playback position the way a time update would
pub fn play_to(player: &mut Player<RecordingEngine>, position_secs: f64) {
    player.engine_mut().position = position_secs;
    player.handle_engine_event(EngineEvent::PositionChanged { position_secs });
}

/// Payloads of all queued `StateChanged` events
pub fn payloads(player: &mut Player<RecordingEngine>) -> Vec<ViewPayload> {
    player
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            PlaybackEvent::StateChanged { payload } => Some(payload),
            PlaybackEvent::PlaybackRejected { .. } => None,
        })
        .collect()
}
