/// Host configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tapedeck_core::{Catalog, CatalogEntry, TrackId};
use tapedeck_playback::{LyricsBook, PlaybackConfig, ViewConfig};

/// Config file read when `--config` is not given (optional)
pub const DEFAULT_CONFIG_FILE: &str = "tapedeck.toml";

/// Environment prefix; `TAPEDECK_PLAYER__VOLUME=0.5` overrides `player.volume`
pub const ENV_PREFIX: &str = "TAPEDECK";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub player: PlaybackConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub tracks: Vec<TrackConfig>,

    #[serde(default)]
    pub lyrics: Vec<LyricsEntry>,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// One `[[tracks]]` entry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackConfig {
    pub id: u32,

    pub title: String,

    pub artist: String,

    #[serde(alias = "source")]
    pub src: String,

    #[serde(default)]
    pub cover: Option<String>,

    /// Length reported by the simulated engine
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl From<&TrackConfig> for CatalogEntry {
    fn from(track: &TrackConfig) -> Self {
        Self {
            id: track.id,
            title: track.title.clone(),
            artist: track.artist.clone(),
            src: track.src.clone(),
            cover: track.cover.clone(),
        }
    }
}

/// One `[[lyrics]]` entry, matched on exact title
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LyricsEntry {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Engine clock resolution
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Reject the first play request, like a browser autoplay policy
    #[serde(default)]
    pub block_autoplay: bool,

    /// Length of tracks without `duration_secs`
    #[serde(default = "default_track_duration_secs")]
    pub default_duration_secs: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            block_autoplay: false,
            default_duration_secs: default_track_duration_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with TAPEDECK_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(CliError::Config(
                "no tracks configured (add [[tracks]] entries)".to_string(),
            ));
        }

        let volume = self.player.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "player.volume must be between 0 and 1, got {volume}"
            )));
        }

        let threshold = self.player.restart_threshold_secs;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(CliError::Config(format!(
                "player.restart_threshold_secs must be a non-negative number, got {threshold}"
            )));
        }

        if self.simulation.tick_ms == 0 {
            return Err(CliError::Config(
                "simulation.tick_ms must be positive".to_string(),
            ));
        }

        if let Some(track) = self
            .tracks
            .iter()
            .find(|t| t.duration_secs.is_some_and(|d| !d.is_finite() || d <= 0.0))
        {
            return Err(CliError::Config(format!(
                "track {} has an invalid duration",
                track.id
            )));
        }

        Ok(())
    }

    /// Build the catalog from `[[tracks]]`
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::from_entries(
            self.tracks.iter().map(CatalogEntry::from),
        )?)
    }

    /// Lyrics keyed by title
    pub fn lyrics_book(&self) -> LyricsBook {
        self.lyrics
            .iter()
            .map(|entry| (entry.title.as_str(), entry.text.as_str()))
            .collect()
    }

    /// Per-track lengths for the simulated engine
    pub fn track_durations(&self) -> HashMap<TrackId, f64> {
        self.tracks
            .iter()
            .filter_map(|t| t.duration_secs.map(|d| (TrackId::new(t.id), d)))
            .collect()
    }
}

// Default values
fn default_tick_ms() -> u64 {
    250
}

fn default_track_duration_secs() -> f64 {
    180.0
}
