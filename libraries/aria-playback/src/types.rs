//! Core types for playback state

use aria_core::Track;
use serde::{Deserialize, Serialize};

/// Advance policy for `next`/`prev` and for natural end of media
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    /// Replay the current track when it ends; explicit skips step sequentially
    RepeatOne,

    /// Step through the queue, wrapping at both ends
    #[default]
    RepeatAll,

    /// Pick a uniformly random index (the current one included)
    Shuffle,
}

impl PlaybackMode {
    /// Kebab-case name, as used in settings and by the browser bindings
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackMode::RepeatOne => "repeat-one",
            PlaybackMode::RepeatAll => "repeat-all",
            PlaybackMode::Shuffle => "shuffle",
        }
    }

    /// Parse a kebab-case name
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "repeat-one" | "repeat_one" | "one" => Some(PlaybackMode::RepeatOne),
            "repeat-all" | "repeat_all" | "all" => Some(PlaybackMode::RepeatAll),
            "shuffle" | "random" => Some(PlaybackMode::Shuffle),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a new playback state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    pub volume: f32,

    /// Initial mode (default: repeat-all)
    pub mode: PlaybackMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.8,
            mode: PlaybackMode::RepeatAll,
        }
    }
}

/// Point-in-time view of the playback state for UI collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    /// Currently selected track
    pub current: Option<Track>,

    /// Index of `current` in the queue
    pub position: Option<usize>,

    /// Play/pause intent
    pub playing: bool,

    /// Advance policy
    pub mode: PlaybackMode,

    /// Stored volume (0.0-1.0)
    pub volume: f32,

    /// Number of queued tracks
    pub queue_len: usize,
}
