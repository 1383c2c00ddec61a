//! Aria Player - Playback State
//!
//! Platform-agnostic playback state for Aria Player.
//!
//! This crate provides:
//! - The playback queue and the current position in it
//! - Play/pause intent, kept separate from what the audio device is doing
//! - Volume (0.0-1.0, clamped)
//! - Advance modes (repeat-one, repeat-all, shuffle)
//! - Change notifications for whoever drives the audio transport
//! - Player settings loaded from `aria.toml` and the environment
//!
//! # Architecture
//!
//! `aria-playback` is a leaf: it performs no I/O while playing. Each
//! transition runs to completion synchronously and records the facts it
//! changed; the transport binder (`aria-transport`) drains those changes and
//! turns them into transport commands.
//!
//! # Example
//!
//! ```rust
//! use aria_core::Track;
//! use aria_playback::{PlaybackConfig, PlaybackMode, PlaybackState, StateChange};
//!
//! let mut state = PlaybackState::new(PlaybackConfig::default());
//! state.set_queue(
//!     vec![
//!         Track::new("0", "First", "/audio/first.flac", 120.0),
//!         Track::new("1", "Second", "/audio/second.flac", 95.0),
//!     ],
//!     0,
//! );
//! state.play(None);
//! state.next();
//! assert_eq!(state.position(), Some(1));
//!
//! state.set_mode(PlaybackMode::Shuffle);
//! let changes = state.drain_changes();
//! assert!(changes.contains(&StateChange::IntentChanged { playing: true }));
//! ```

mod error;
mod events;
mod settings;
mod state;
pub mod types;

// Public exports
pub use error::{Result, SettingsError};
pub use events::StateChange;
pub use settings::{PlayerSettings, ENV_PREFIX, SETTINGS_FILE};
pub use state::PlaybackState;
pub use types::{PlaybackConfig, PlaybackMode, PlaybackSnapshot};
