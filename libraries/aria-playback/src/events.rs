//! State change notifications
//!
//! Every transition of [`PlaybackState`](crate::PlaybackState) records what
//! it changed. Observers (the transport binder, UI bindings) drain the
//! pending list after each call and react to it. Reacting twice to the same
//! fact must be harmless.

use aria_core::Track;
use serde::{Deserialize, Serialize};

use crate::types::PlaybackMode;

/// A fact about the playback state that changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// The selected track changed, or the same index was selected again
    TrackChanged {
        /// Track selected before the transition
        previous: Option<Track>,
        /// Track selected now
        current: Option<Track>,
    },

    /// The play/pause intent flipped
    IntentChanged {
        /// New intent
        playing: bool,
    },

    /// The advance policy changed
    ModeChanged {
        /// New mode
        mode: PlaybackMode,
    },

    /// The queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// The stored volume changed
    VolumeChanged {
        /// New volume (0.0-1.0)
        volume: f32,
    },
}

impl StateChange {
    /// Whether the transport binder has to act on this change
    pub fn affects_transport(&self) -> bool {
        matches!(
            self,
            StateChange::TrackChanged { .. } | StateChange::IntentChanged { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_track_and_intent_reach_the_transport() {
        assert!(StateChange::IntentChanged { playing: true }.affects_transport());
        assert!(StateChange::TrackChanged {
            previous: None,
            current: None
        }
        .affects_transport());
        assert!(!StateChange::ModeChanged {
            mode: PlaybackMode::Shuffle
        }
        .affects_transport());
        assert!(!StateChange::VolumeChanged { volume: 0.5 }.affects_transport());
        assert!(!StateChange::QueueChanged { length: 3 }.affects_transport());
    }
}
