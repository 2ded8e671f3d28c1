//! WASM-compatible type definitions

use crate::{LyricsBook, PlaybackConfig, ViewConfig};
use serde::Deserialize;
use std::collections::HashMap;

/// Options object accepted by the `WasmPlayer` constructor
///
/// Every field is optional on the JavaScript side:
///
/// ```js
/// new WasmPlayer(audio, tracks, {
///   player: { volume: 0.8, mode: "shuffle" },
///   view: { default_cover: "img/cover.jpg" },
///   lyrics: { "mirrors": "..." },
/// });
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WasmPlayerOptions {
    pub player: PlaybackConfig,
    pub view: ViewConfig,
    pub lyrics: HashMap<String, String>,
}

impl WasmPlayerOptions {
    /// Lyrics keyed by exact title
    pub fn lyrics_book(&self) -> LyricsBook {
        self.lyrics.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}
