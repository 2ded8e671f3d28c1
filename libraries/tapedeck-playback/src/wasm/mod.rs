//! WASM bindings for tapedeck-playback
//!
//! Drives a browser `HTMLAudioElement` through the core [`Player`](crate::Player)
//! and exposes the player's commands to JavaScript.

pub mod engine;
pub mod player;
pub mod types;

pub use engine::{HtmlAudioEngine, Inbox};
pub use player::WasmPlayer;
pub use types::WasmPlayerOptions;
