//! JavaScript-facing player

use aria_core::{Catalog, Track};
use aria_playback::{PlaybackConfig, PlaybackMode, StateChange};
use js_sys::Function;
use wasm_bindgen::prelude::*;

use super::html_audio::HtmlAudioTransport;
use crate::binder::PlayOutcome;
use crate::session::PlayerSession;

/// Player session driving a browser `<audio>` element
///
/// The host calls `pump()` from its animation frame (or a timer) so media
/// events and play settlements flow back into the state.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: PlayerSession<HtmlAudioTransport>,

    // Event callbacks
    on_state_change: Option<Function>,
    on_track_change: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player with a detached `<audio>` element
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let transport =
            HtmlAudioTransport::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_transport(transport))
    }

    /// Create a player bound to an `<audio>` element already in the page
    #[wasm_bindgen(js_name = fromElement)]
    pub fn from_element(audio: web_sys::HtmlAudioElement) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let transport = HtmlAudioTransport::from_element(audio)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_transport(transport))
    }

    // ===== Queue =====

    /// Replace the queue with an array of tracks
    #[wasm_bindgen(js_name = setQueue)]
    pub fn set_queue(&mut self, tracks: JsValue, start_index: Option<i32>) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;

        self.inner.set_queue(tracks, clamp_index(start_index.unwrap_or(0)));
        self.emit_changes();
        Ok(())
    }

    /// Queue every song of a catalog (`{ groups, songs }`)
    #[wasm_bindgen(js_name = setCatalog)]
    pub fn set_catalog(&mut self, catalog: JsValue) -> Result<(), JsValue> {
        let catalog: Catalog = serde_wasm_bindgen::from_value(catalog)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse catalog: {}", e)))?;

        self.inner.set_queue(catalog.to_queue(), 0);
        self.emit_changes();
        Ok(())
    }

    /// Tracks in the queue
    #[wasm_bindgen(js_name = getQueue)]
    pub fn get_queue(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.state().queue()).unwrap_or(JsValue::NULL)
    }

    // ===== Playback Control =====

    /// Play, optionally selecting `index` first (negative selects the first track)
    pub fn play(&mut self, index: Option<i32>) {
        self.inner.play(index.map(clamp_index));
        self.emit_changes();
    }

    /// Pause
    pub fn pause(&mut self) {
        self.inner.pause();
        self.emit_changes();
    }

    /// Flip between playing and paused
    pub fn toggle(&mut self) {
        self.inner.toggle();
        self.emit_changes();
    }

    /// Skip forward
    pub fn next(&mut self) {
        self.inner.next();
        self.emit_changes();
    }

    /// Skip back
    pub fn prev(&mut self) {
        self.inner.prev();
        self.emit_changes();
    }

    /// Seek to position in seconds
    pub fn seek(&mut self, seconds: f64) {
        self.inner.seek(seconds);
    }

    /// Feed pending media events into the player
    pub fn pump(&mut self) {
        let outcomes = self.inner.pump();

        for outcome in outcomes {
            if let PlayOutcome::Failed { error, .. } = outcome {
                web_sys::console::warn_1(&JsValue::from_str(&error.to_string()));
                if let Some(ref cb) = self.on_error {
                    cb.call1(&JsValue::NULL, &JsValue::from_str(&error.to_string()))
                        .ok();
                }
            }
        }

        self.emit_changes();
    }

    /// Release the `<audio>` element
    pub fn shutdown(&mut self) {
        self.inner.shutdown();
    }

    // ===== Volume & Mode =====

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f32) {
        self.inner.set_volume(volume);
        self.emit_changes();
    }

    /// Set mode ("repeat-one" | "repeat-all" | "shuffle")
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = PlaybackMode::parse(mode).ok_or_else(|| {
            JsValue::from_str("Invalid mode. Use 'repeat-one', 'repeat-all', or 'shuffle'")
        })?;

        self.inner.set_mode(mode);
        self.emit_changes();
        Ok(())
    }

    // ===== State Queries =====

    /// Current track, or null
    #[wasm_bindgen(js_name = getCurrentTrack)]
    pub fn get_current_track(&self) -> JsValue {
        self.inner
            .state()
            .current()
            .and_then(|track| serde_wasm_bindgen::to_value(track).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Index of the current track, or undefined
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> Option<u32> {
        self.inner.state().position().map(|p| p as u32)
    }

    /// Play/pause intent
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.state().is_playing()
    }

    /// Stored volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> f32 {
        self.inner.state().volume()
    }

    /// Current mode as string
    #[wasm_bindgen(js_name = getMode)]
    pub fn get_mode(&self) -> String {
        self.inner.state().mode().as_str().to_string()
    }

    /// Playback position in seconds
    #[wasm_bindgen(js_name = getCurrentTime)]
    pub fn get_current_time(&self) -> f64 {
        self.inner.signals().current_time()
    }

    /// Duration of the loaded source in seconds
    #[wasm_bindgen(js_name = getDuration)]
    pub fn get_duration(&self) -> f64 {
        self.inner.signals().duration()
    }

    /// Whether the loaded source can start playing
    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.inner.signals().is_ready()
    }

    /// Most recent play-start failure, or undefined
    #[wasm_bindgen(js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error().map(|e| e.to_string())
    }

    // ===== Event Listeners =====

    /// Register play/pause callback, called with a boolean
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    /// Register track change callback, called with the track or null
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&mut self, callback: Function) {
        self.on_track_change = Some(callback);
    }

    /// Register error callback, called with a message
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }
}

impl WasmPlayer {
    fn with_transport(transport: HtmlAudioTransport) -> Self {
        let mut inner = PlayerSession::new(transport, PlaybackConfig::default());
        inner.observe_changes(true);

        Self {
            inner,
            on_state_change: None,
            on_track_change: None,
            on_error: None,
        }
    }

    // ===== Internal Event Emitters =====

    fn emit_changes(&mut self) {
        for change in self.inner.take_changes() {
            match change {
                StateChange::IntentChanged { playing } => {
                    if let Some(ref cb) = self.on_state_change {
                        cb.call1(&JsValue::NULL, &JsValue::from_bool(playing)).ok();
                    }
                }
                StateChange::TrackChanged { current, .. } => {
                    if let Some(ref cb) = self.on_track_change {
                        let track = current
                            .and_then(|t| serde_wasm_bindgen::to_value(&t).ok())
                            .unwrap_or(JsValue::NULL);
                        cb.call1(&JsValue::NULL, &track).ok();
                    }
                }
                _ => {}
            }
        }
    }
}

fn clamp_index(index: i32) -> usize {
    usize::try_from(index).unwrap_or(0)
}
