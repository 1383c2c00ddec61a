//! Player session - one playback state bound to one transport
//!
//! The session is the single owner of the [`PlaybackState`]. Every UI
//! operation runs its transition and then lets the binder bring the
//! transport in line before returning.

use aria_core::{Catalog, Track};
use aria_playback::{
    PlaybackConfig, PlaybackMode, PlaybackSnapshot, PlaybackState, PlayerSettings, StateChange,
};
use tracing::info;

use crate::binder::{PlayOutcome, TransportBinder};
use crate::error::{SessionError, TransportError};
use crate::signals::TransportSignals;
use crate::transport::AudioTransport;

/// Playback state plus the transport binder driving it
pub struct PlayerSession<T: AudioTransport> {
    state: PlaybackState,
    binder: TransportBinder<T>,
}

impl<T: AudioTransport> PlayerSession<T> {
    /// Start a session with an empty queue
    pub fn new(transport: T, config: PlaybackConfig) -> Self {
        Self::with_state(transport, PlaybackState::new(config))
    }

    /// Start a session around an existing state
    ///
    /// The state's volume is pushed to the transport and any changes it
    /// already recorded are applied.
    pub fn with_state(transport: T, state: PlaybackState) -> Self {
        let mut session = Self {
            state,
            binder: TransportBinder::new(transport),
        };
        session.binder.set_volume(session.state.volume());
        session.binder.sync(&mut session.state);

        info!("Player session started");
        session
    }

    /// Start a session from loaded settings
    ///
    /// When the settings name a catalog, its songs are queued (paused, at
    /// the first track).
    pub fn from_settings(transport: T, settings: &PlayerSettings) -> Result<Self, SessionError> {
        settings.validate()?;

        let mut session = Self::new(transport, PlaybackConfig::from(settings));

        if let Some(path) = &settings.catalog {
            let catalog = Catalog::load(path)?;
            catalog.validate()?;
            info!(
                "Queued catalog {} ({} songs)",
                path.display(),
                catalog.len()
            );
            session.set_queue(catalog.to_queue(), 0);
        }

        Ok(session)
    }

    // ===== Operations =====

    /// Replace the queue and select `start_index`
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.state.set_queue(tracks, start_index);
        self.sync();
    }

    /// Play, optionally selecting `index` first
    pub fn play(&mut self, index: Option<usize>) {
        self.state.play(index);
        self.sync();
    }

    /// Pause
    pub fn pause(&mut self) {
        self.state.pause();
        self.sync();
    }

    /// Flip between playing and paused
    pub fn toggle(&mut self) {
        self.state.toggle();
        self.sync();
    }

    /// Skip forward
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.state.next();
        self.sync();
    }

    /// Skip back
    pub fn prev(&mut self) {
        self.state.prev();
        self.sync();
    }

    /// Store the volume and apply it to the transport
    pub fn set_volume(&mut self, volume: f32) {
        self.state.set_volume(volume);
        self.binder.set_volume(self.state.volume());
        self.sync();
    }

    /// Change the advance policy
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.state.set_mode(mode);
        self.sync();
    }

    /// Move the playback position of the loaded source
    pub fn seek(&mut self, seconds: f64) {
        self.binder.seek(seconds);
    }

    /// Feed pending transport events through the binder
    pub fn pump(&mut self) -> Vec<PlayOutcome> {
        self.binder.pump(&mut self.state)
    }

    /// Release the transport; later operations only touch the state
    pub fn shutdown(&mut self) {
        self.binder.shutdown();
        info!("Player session closed");
    }

    // ===== Queries =====

    /// Playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned view of the playback state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.state.snapshot()
    }

    /// Current time, duration and readiness
    pub fn signals(&self) -> TransportSignals {
        self.binder.signals()
    }

    /// Record applied state changes for [`take_changes`](Self::take_changes)
    ///
    /// Off by default, so a session nobody observes keeps nothing around.
    pub fn observe_changes(&mut self, observe: bool) {
        self.binder.observe_changes(observe);
    }

    /// Take the state changes applied since the last call
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        self.binder.take_changes()
    }

    /// Most recent play-start failure
    pub fn last_error(&self) -> Option<&TransportError> {
        self.binder.last_error()
    }

    /// Bound transport
    pub fn transport(&self) -> &T {
        self.binder.transport()
    }

    /// Bound transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        self.binder.transport_mut()
    }

    fn sync(&mut self) {
        self.binder.sync(&mut self.state);
    }
}

impl<T: AudioTransport> std::fmt::Debug for PlayerSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession")
            .field("state", &self.state)
            .field("binder", &self.binder)
            .finish()
    }
}
