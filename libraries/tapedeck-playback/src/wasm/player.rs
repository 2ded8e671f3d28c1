//! WASM-compatible Player wrapper

use super::engine::{HtmlAudioEngine, Inbox};
use super::types::WasmPlayerOptions;
use crate::{PlaybackEvent, Player};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use tapedeck_core::{Catalog, CatalogEntry};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

struct Shared {
    player: RefCell<Player<HtmlAudioEngine>>,
    inbox: Inbox,
    on_state_change: RefCell<Option<Function>>,
    on_notice: RefCell<Option<Function>>,
}

impl Shared {
    /// Feed queued engine events to the player and dispatch its output
    ///
    /// A no-op while the player is already borrowed; the command holding the
    /// borrow pumps again once it is done.
    fn pump(&self) {
        let events = {
            let Ok(mut player) = self.player.try_borrow_mut() else {
                return;
            };
            while let Some(event) = self.inbox.pop() {
                player.handle_engine_event(event);
            }
            player.drain_events()
        };

        for event in &events {
            self.dispatch(event);
        }
    }

    fn dispatch(&self, event: &PlaybackEvent) {
        let (callback, value) = match event {
            PlaybackEvent::StateChanged { payload } => (
                self.on_state_change.borrow().clone(),
                serde_wasm_bindgen::to_value(payload),
            ),
            PlaybackEvent::PlaybackRejected { .. } => (
                self.on_notice.borrow().clone(),
                serde_wasm_bindgen::to_value(event),
            ),
        };

        if let (Some(cb), Ok(value)) = (callback, value) {
            cb.call1(&JsValue::NULL, &value).ok();
        }
    }
}

/// WASM-compatible player
///
/// Wraps the core [`Player`] around an `HTMLAudioElement`.
#[wasm_bindgen]
pub struct WasmPlayer {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player
    ///
    /// `tracks` is an array of `{ id, title, artist, src, cover? }`; `options`
    /// may be omitted (see [`WasmPlayerOptions`]).
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlAudioElement,
        tracks: JsValue,
        options: JsValue,
    ) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let entries: Vec<CatalogEntry> = serde_wasm_bindgen::from_value(tracks)?;
        let catalog =
            Catalog::from_entries(entries).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let options: WasmPlayerOptions = if options.is_undefined() || options.is_null() {
            WasmPlayerOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };

        let inbox = Inbox::default();
        let engine = HtmlAudioEngine::new(element, inbox.clone())?;
        let player = Player::new(catalog, engine, options.player.clone())
            .with_lyrics(options.lyrics_book())
            .with_view_config(options.view);

        let shared = Rc::new(Shared {
            player: RefCell::new(player),
            inbox,
            on_state_change: RefCell::new(None),
            on_notice: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        shared.inbox.set_waker(move || {
            if let Some(shared) = weak.upgrade() {
                shared.pump();
            }
        });

        Ok(Self { shared })
    }

    // ===== Playback Control =====

    /// Load and play the track at `index`
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, index: usize) {
        self.with_player(|p| p.select_track(index));
    }

    /// Play/pause
    #[wasm_bindgen(js_name = togglePlayback)]
    pub fn toggle_playback(&self) {
        self.with_player(Player::toggle_playback);
    }

    /// Skip to next track
    pub fn next(&self) {
        self.with_player(Player::next);
    }

    /// Go to previous track (or restart the current one)
    pub fn previous(&self) {
        self.with_player(Player::previous);
    }

    /// Play the catalog from the first track
    #[wasm_bindgen(js_name = startAlbum)]
    pub fn start_album(&self) {
        self.with_player(Player::start_album);
    }

    // ===== Modes, Volume, Seeking =====

    /// Forward mode cycle
    #[wasm_bindgen(js_name = cycleMode)]
    pub fn cycle_mode(&self) {
        self.with_player(Player::cycle_mode);
    }

    /// Backward mode cycle (detail view shuffle button)
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) {
        self.with_player(Player::toggle_shuffle);
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f32) {
        self.with_player(|p| p.set_volume(level));
    }

    /// Seek to a fraction (0.0 - 1.0) of the track
    pub fn seek(&self, fraction: f64) {
        self.with_player(|p| p.seek(fraction));
    }

    // ===== Detail View =====

    /// Show or hide lyrics
    #[wasm_bindgen(js_name = toggleLyrics)]
    pub fn toggle_lyrics(&self) {
        self.with_player(Player::toggle_lyrics);
    }

    /// Leave the track detail view
    #[wasm_bindgen(js_name = closeTrackDetail)]
    pub fn close_track_detail(&self) {
        self.with_player(Player::close_track_detail);
    }

    // ===== State Queries =====

    /// Current view payload
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let payload = self
            .shared
            .player
            .try_borrow()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .view();
        Ok(serde_wasm_bindgen::to_value(&payload)?)
    }

    /// Catalog tracks, in order
    pub fn tracks(&self) -> JsValue {
        self.shared
            .player
            .try_borrow()
            .ok()
            .and_then(|p| serde_wasm_bindgen::to_value(p.catalog().tracks()).ok())
            .unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register state change callback (receives the view payload)
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        *self.shared.on_state_change.borrow_mut() = Some(callback);
    }

    /// Register notice callback (receives rejected-playback events)
    #[wasm_bindgen(js_name = onNotice)]
    pub fn on_notice(&self, callback: Function) {
        *self.shared.on_notice.borrow_mut() = Some(callback);
    }
}

impl WasmPlayer {
    fn with_player(&self, command: impl FnOnce(&mut Player<HtmlAudioEngine>)) {
        if let Ok(mut player) = self.shared.player.try_borrow_mut() {
            command(&mut *player);
        }
        self.shared.pump();
    }
}
