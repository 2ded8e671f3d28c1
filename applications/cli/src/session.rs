//! Player session
//!
//! Owns a [`Player`] wired to the [`SimulatedEngine`] and writes every
//! outbound event as one JSON line.

use crate::config::AppConfig;
use crate::error::Result;
use crate::simulated::SimulatedEngine;
use std::io::Write;
use std::time::Duration;
use tapedeck_core::Catalog;
use tapedeck_playback::{Command, PlaybackEvent, Player};
use tracing::{debug, info};

pub struct Session {
    player: Player<SimulatedEngine>,
    tick: Duration,
}

impl Session {
    /// Build a session from validated configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let catalog = config.catalog()?;
        let engine = SimulatedEngine::new(&config.simulation, config.track_durations());
        let lyrics = config.lyrics_book();

        info!(
            tracks = catalog.len(),
            lyrics = lyrics.len(),
            mode = %config.player.mode,
            "Starting session"
        );
        if lyrics.is_empty() {
            debug!("No lyrics configured, every track shows the placeholder");
        }

        let player = Player::new(catalog, engine, config.player.clone())
            .with_lyrics(lyrics)
            .with_view_config(config.view.clone());

        Ok(Self {
            player,
            tick: Duration::from_millis(config.simulation.tick_ms),
        })
    }

    /// Engine clock resolution
    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    pub fn player(&self) -> &Player<SimulatedEngine> {
        &self.player
    }

    /// Apply a user command and write the resulting events
    pub fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        self.player.apply(command);
        self.flush(out)
    }

    /// Advance the engine clock one tick
    pub fn tick(&mut self, out: &mut impl Write) -> Result<()> {
        let dt = self.tick.as_secs_f64();
        let events = self.player.engine_mut().advance(dt);
        for event in events {
            self.player.handle_engine_event(event);
        }
        self.flush(out)
    }

    /// Write the current projection without changing state
    pub fn write_status(&self, out: &mut impl Write) -> Result<()> {
        let event = PlaybackEvent::StateChanged {
            payload: self.player.view(),
        };
        write_event(&event, out)?;
        out.flush()?;
        Ok(())
    }

    /// Write queued events, oldest first
    pub fn flush(&mut self, out: &mut impl Write) -> Result<()> {
        if !self.player.has_pending_events() {
            return Ok(());
        }
        for event in self.player.drain_events() {
            write_event(&event, out)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn write_event(event: &PlaybackEvent, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)?;
    Ok(())
}

/// Numbered track listing, 1-based to match `select <n>`
pub fn write_track_list(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for (number, track) in catalog.iter().enumerate().map(|(i, t)| (i + 1, t)) {
        writeln!(out, "{number:>3}. {} - {}", track.artist, track.title)?;
    }
    Ok(())
}
