//! Aria Player - Transport Binder
//!
//! Keeps an audio transport in step with the playback state.
//!
//! This crate provides:
//! - The [`AudioTransport`] capability (load, play, pause, seek, volume, events)
//! - [`TransportBinder`], which turns state changes into transport commands
//!   and transport events back into state transitions
//! - [`PlayerSession`], the single owner of a session's playback state
//! - [`MemoryTransport`] for tests and headless hosts
//! - `HtmlAudioTransport` and `WasmPlayer` for browsers (feature `wasm`)
//!
//! # Example
//!
//! ```rust
//! use aria_core::Track;
//! use aria_playback::PlaybackConfig;
//! use aria_transport::{MemoryTransport, PlayOutcome, PlayerSession};
//!
//! let mut session = PlayerSession::new(MemoryTransport::new(), PlaybackConfig::default());
//! session.set_queue(vec![Track::new("1", "Intro", "/audio/intro.flac", 90.0)], 0);
//! session.play(None);
//!
//! // The browser (here: the test transport) answers the play request later.
//! let generation = session.transport_mut().settle_latest(Ok(())).unwrap();
//! assert_eq!(session.pump(), vec![PlayOutcome::Started(generation)]);
//! ```

mod binder;
mod error;
mod memory;
mod session;
mod signals;
mod transport;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use binder::{PlayOutcome, TransportBinder};
pub use error::{Result, SessionError, TransportError};
pub use memory::{MemoryTransport, PlayPolicy, TransportCommand};
pub use session::PlayerSession;
pub use signals::TransportSignals;
pub use transport::{AudioTransport, PlayGeneration, TransportEvent};

#[cfg(feature = "wasm")]
pub use wasm::{HtmlAudioTransport, WasmPlayer};
