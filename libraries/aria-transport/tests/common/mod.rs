//! Shared helpers for transport integration tests

#![allow(dead_code)]

use aria_core::Track;
use aria_playback::{PlaybackConfig, PlaybackMode};
use aria_transport::{MemoryTransport, PlayerSession};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Tracks named after `ids`, each with a `/audio/<id>.flac` source
pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter()
        .map(|id| {
            Track::new(*id, format!("Song {}", id), format!("/audio/{}.flac", id), 180.0)
                .with_artist("Test Artist")
        })
        .collect()
}

/// Session over a manual-settling memory transport
pub fn session(mode: PlaybackMode) -> PlayerSession<MemoryTransport> {
    init_tracing();
    PlayerSession::new(
        MemoryTransport::new(),
        PlaybackConfig {
            volume: 0.8,
            mode,
        },
    )
}

/// Session with `ids` queued at index 0 and the command log cleared
pub fn queued_session(mode: PlaybackMode, ids: &[&str]) -> PlayerSession<MemoryTransport> {
    let mut session = session(mode);
    session.set_queue(tracks(ids), 0);
    session.transport_mut().take_commands();
    session.take_changes();
    session
}
