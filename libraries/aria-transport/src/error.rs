//! Error types for the audio transport and the player session

use thiserror::Error;

/// Transport errors
///
/// These never abort the binder: a failed playback start is folded back
/// into the playback state as a pause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The host refused to start playback (autoplay policy, user gesture)
    #[error("Playback not allowed: {0}")]
    NotAllowed(String),

    /// Playback was requested but the source could not be played
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// Playback was requested with nothing loaded
    #[error("No source loaded")]
    NoSource,

    /// Backend-specific failure
    #[error("Transport backend error: {0}")]
    Backend(String),
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised while assembling a player session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Settings could not be loaded
    #[error(transparent)]
    Settings(#[from] aria_playback::SettingsError),

    /// The configured catalog could not be loaded
    #[error(transparent)]
    Catalog(#[from] aria_core::AriaError),
}
