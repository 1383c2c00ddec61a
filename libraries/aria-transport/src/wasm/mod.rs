//! WASM bindings for aria-transport
//!
//! Browser transport over `HtmlAudioElement` and a JavaScript-friendly
//! player facade.

pub mod html_audio;
pub mod player;

pub use html_audio::HtmlAudioTransport;
pub use player::WasmPlayer;
