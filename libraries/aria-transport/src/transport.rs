//! Audio transport capability
//!
//! Abstracts the host's audio element so the binder works the same against
//! a browser `<audio>` element, a native player or an in-memory fake.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};

/// Identifies one playback-start request
///
/// Generations increase monotonically per binder. A settlement carrying an
/// older generation than the binder's outstanding request is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayGeneration(u64);

impl PlayGeneration {
    /// Wrap a raw generation number
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw generation number
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Events raised by the transport, delivered through [`AudioTransport::poll_events`]
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Periodic progress report (`timeupdate`)
    TimeUpdate {
        /// Playback position in seconds
        current_time: f64,
        /// Media duration in seconds (may be NaN before metadata is known)
        duration: f64,
    },

    /// Enough data is buffered to start (`canplay`)
    CanPlay,

    /// The loaded source played to its end (`ended`)
    Ended,

    /// A deferred playback-start request resolved
    PlaySettled {
        /// Request this settlement belongs to
        generation: PlayGeneration,
        /// `Ok` once audio started, the reason otherwise
        result: Result<()>,
    },
}

impl TransportEvent {
    /// Whether the event describes the loaded media rather than a play request
    pub fn is_media_event(&self) -> bool {
        !matches!(self, TransportEvent::PlaySettled { .. })
    }

    /// Successful settlement of `generation`
    pub fn started(generation: PlayGeneration) -> Self {
        Self::PlaySettled {
            generation,
            result: Ok(()),
        }
    }

    /// Failed settlement of `generation`
    pub fn rejected(generation: PlayGeneration, error: TransportError) -> Self {
        Self::PlaySettled {
            generation,
            result: Err(error),
        }
    }
}

/// Platform audio transport
///
/// Holds at most one source. Commands return immediately; everything the
/// transport learns later (progress, readiness, end of media, the outcome
/// of a play request) is queued and handed out by `poll_events`.
pub trait AudioTransport {
    /// Replace the loaded source with `url`
    fn load(&mut self, url: &str);

    /// Drop the loaded source and release its decoder
    fn unload(&mut self);

    /// Request playback; the outcome arrives as [`TransportEvent::PlaySettled`]
    fn play(&mut self, generation: PlayGeneration);

    /// Pause playback; a no-op when already paused
    fn pause(&mut self);

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds
    fn duration(&self) -> f64;

    /// Output volume (0.0-1.0)
    fn volume(&self) -> f32;

    /// Set the output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Take every event raised since the last call, oldest first
    fn poll_events(&mut self) -> Vec<TransportEvent>;
}
