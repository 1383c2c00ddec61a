//! Transport binder - keeps one audio transport in step with the playback state
//!
//! State → transport: after each transition the binder drains the recorded
//! [`StateChange`]s and issues the matching commands (load, play, pause).
//!
//! Transport → state: progress, readiness and end-of-media events update the
//! derived [`TransportSignals`] or advance the queue; settlements of play
//! requests either confirm playback or force the intent back to paused.
//!
//! Play requests are asynchronous. Each one carries a [`PlayGeneration`];
//! loading a new source or pausing invalidates the outstanding generation,
//! so a late rejection for an abandoned request never pauses a session that
//! has since moved on.
//!
//! Media events are tied to a source the same way. Every load starts a new
//! load epoch; `timeupdate`, `canplay` and `ended` still queued from an
//! earlier source are dropped instead of being applied to the new one.

use std::collections::VecDeque;

use aria_core::{Track, TrackId};
use aria_playback::{PlaybackMode, PlaybackState, StateChange};
use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::signals::TransportSignals;
use crate::transport::{AudioTransport, PlayGeneration, TransportEvent};

/// Resolution of a play request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The current request started audio
    Started(PlayGeneration),

    /// The current request failed; the intent was forced to paused
    Failed {
        /// Failed request
        generation: PlayGeneration,
        /// Why the transport refused
        error: TransportError,
    },

    /// The request was overtaken by a newer load, play or pause
    Superseded(PlayGeneration),
}

/// Binds a [`PlaybackState`] to an [`AudioTransport`]
///
/// The binder does not own the state: it is handed in by `&mut` so the
/// session keeps a single owner for it.
pub struct TransportBinder<T: AudioTransport> {
    transport: T,
    signals: TransportSignals,

    /// Track whose source is loaded, as far as the binder is concerned
    loaded: Option<TrackId>,

    /// Latest play request for the loaded source, pending or started
    active_play: Option<PlayGeneration>,
    next_generation: u64,

    /// Bumped on every load; tags events with the source they came from
    load_epoch: u64,

    /// Polled events not handled yet, with the epoch they were raised in
    backlog: VecDeque<(u64, TransportEvent)>,

    last_error: Option<TransportError>,

    /// Changes drained from the state, kept for UI observers when enabled
    observed: Vec<StateChange>,
    observe: bool,

    shut_down: bool,
}

impl<T: AudioTransport> TransportBinder<T> {
    /// Bind `transport`; nothing is loaded until the first sync
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            signals: TransportSignals::default(),
            loaded: None,
            active_play: None,
            next_generation: 1,
            load_epoch: 0,
            backlog: VecDeque::new(),
            last_error: None,
            observed: Vec::new(),
            observe: false,
            shut_down: false,
        }
    }

    // ===== State → transport =====

    /// Apply every pending state change to the transport
    ///
    /// Redundant calls are harmless: with nothing pending, nothing is sent.
    pub fn sync(&mut self, state: &mut PlaybackState) {
        if !state.has_pending_changes() {
            return;
        }

        let changes = state.drain_changes();
        let track_changed = changes
            .iter()
            .any(|c| matches!(c, StateChange::TrackChanged { .. }));
        let intent_changed = changes
            .iter()
            .any(|c| matches!(c, StateChange::IntentChanged { .. }));
        let affects_transport = changes.iter().any(StateChange::affects_transport);

        if self.observe {
            self.observed.extend(changes);
        }

        if self.shut_down || !affects_transport {
            return;
        }

        // Several changes may have piled up; only the state as it is now
        // matters to the transport.
        if track_changed {
            self.apply_track(state.current());
        }

        self.apply_intent(state.is_playing(), intent_changed);
    }

    /// Forward a seek to the transport
    pub fn seek(&mut self, seconds: f64) {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        debug!("Seek to {:.2}s", seconds);
        self.transport.set_current_time(seconds);
    }

    /// Forward a volume change to the transport
    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.transport.set_volume(volume);
    }

    // ===== Transport → state =====

    /// Drain the transport's events and handle each one
    ///
    /// Media events raised before the latest load are dropped, including
    /// those queued behind an `ended` that advanced the queue in this very
    /// call. Returns the outcome of every play request that settled.
    pub fn pump(&mut self, state: &mut PlaybackState) -> Vec<PlayOutcome> {
        self.stash_events();

        let mut outcomes = Vec::new();
        while let Some((epoch, event)) = self.backlog.pop_front() {
            if epoch != self.load_epoch && event.is_media_event() {
                debug!("Dropping {:?} raised by a previous source", event);
                continue;
            }
            if let Some(outcome) = self.handle_event(event, state) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Handle one transport event as raised by the loaded source
    pub fn handle_event(
        &mut self,
        event: TransportEvent,
        state: &mut PlaybackState,
    ) -> Option<PlayOutcome> {
        match event {
            TransportEvent::TimeUpdate {
                current_time,
                duration,
            } => {
                self.signals.update_time(current_time, duration);
                None
            }
            TransportEvent::CanPlay => {
                self.signals.mark_ready();
                None
            }
            TransportEvent::Ended => {
                self.handle_ended(state);
                None
            }
            TransportEvent::PlaySettled { generation, result } => {
                Some(self.resolve_play(generation, result, state))
            }
        }
    }

    // ===== Lifecycle =====

    /// Pause and unload the transport; the binder ignores the state afterwards
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        info!("Releasing audio transport");
        self.transport.pause();
        self.transport.unload();
        self.loaded = None;
        self.active_play = None;
        self.backlog.clear();
        self.signals.reset();
        self.shut_down = true;
    }

    // ===== Queries =====

    /// Current time, duration and readiness
    pub fn signals(&self) -> TransportSignals {
        self.signals
    }

    /// Most recent play-start failure
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// Outstanding or started play request for the loaded source
    pub fn active_play(&self) -> Option<PlayGeneration> {
        self.active_play
    }

    /// Track the transport has loaded
    pub fn loaded(&self) -> Option<&TrackId> {
        self.loaded.as_ref()
    }

    /// Keep drained state changes for [`take_changes`](Self::take_changes)
    ///
    /// Off by default. Turning it off discards whatever was kept.
    pub fn observe_changes(&mut self, observe: bool) {
        self.observe = observe;
        if !observe {
            self.observed = Vec::new();
        }
    }

    /// Take the state changes kept since the last call
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.observed)
    }

    /// Bound transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Bound transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ===== Internal =====

    /// Move events raised so far into the backlog under the current epoch
    fn stash_events(&mut self) {
        let epoch = self.load_epoch;
        let events = self.transport.poll_events();
        self.backlog
            .extend(events.into_iter().map(|event| (epoch, event)));
    }

    fn apply_track(&mut self, current: Option<&Track>) {
        self.active_play = None;

        // Whatever the old source raised so far belongs to the old epoch.
        self.stash_events();
        self.load_epoch += 1;

        match current {
            Some(track) => {
                info!("Loading track {} ({})", track.id, track.url);
                self.transport.load(&track.url);
                self.loaded = Some(track.id.clone());
                self.signals.reset();
            }
            None => {
                debug!("Queue emptied, pausing transport");
                self.transport.pause();
                self.loaded = None;
                self.signals.clear_ready();
            }
        }
    }

    fn apply_intent(&mut self, playing: bool, intent_changed: bool) {
        if playing {
            if self.loaded.is_some() && self.active_play.is_none() {
                self.request_play();
            }
        } else if intent_changed || self.active_play.is_some() {
            debug!("Pausing transport");
            self.transport.pause();
            self.active_play = None;
        }
    }

    fn request_play(&mut self) {
        let generation = PlayGeneration::new(self.next_generation);
        self.next_generation += 1;
        self.active_play = Some(generation);

        debug!("Requesting playback {}", generation);
        self.transport.play(generation);
    }

    fn handle_ended(&mut self, state: &mut PlaybackState) {
        if self.shut_down {
            return;
        }

        match state.mode() {
            PlaybackMode::RepeatOne => {
                debug!("End of media, repeating current track");
                self.transport.set_current_time(0.0);
                self.signals.set_current_time(0.0);
                self.active_play = None;
                if state.is_playing() && self.loaded.is_some() {
                    self.request_play();
                }
            }
            PlaybackMode::RepeatAll | PlaybackMode::Shuffle => {
                debug!("End of media, advancing");
                state.next();
                self.sync(state);
            }
        }
    }

    fn resolve_play(
        &mut self,
        generation: PlayGeneration,
        result: Result<(), TransportError>,
        state: &mut PlaybackState,
    ) -> PlayOutcome {
        if self.active_play != Some(generation) || !state.is_playing() {
            debug!("Ignoring settlement of superseded request {}", generation);
            // A late start must not override a pause issued since.
            if result.is_ok() && !state.is_playing() && !self.shut_down {
                self.transport.pause();
            }
            return PlayOutcome::Superseded(generation);
        }

        match result {
            Ok(()) => {
                debug!("Playback {} started", generation);
                PlayOutcome::Started(generation)
            }
            Err(error) => {
                warn!("Playback {} failed: {}", generation, error);
                self.active_play = None;
                self.last_error = Some(error.clone());
                state.pause();
                self.sync(state);
                PlayOutcome::Failed { generation, error }
            }
        }
    }
}

impl<T: AudioTransport> Drop for TransportBinder<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<T: AudioTransport> std::fmt::Debug for TransportBinder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportBinder")
            .field("signals", &self.signals)
            .field("loaded", &self.loaded)
            .field("active_play", &self.active_play)
            .field("last_error", &self.last_error)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}
