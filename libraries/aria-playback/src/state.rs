//! Playback state - queue, position, intent, volume and mode
//!
//! Pure data plus transition functions. No I/O happens here; whoever drives
//! the audio transport observes the recorded [`StateChange`]s.

use std::fmt;

use aria_core::Track;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::events::StateChange;
use crate::types::{PlaybackConfig, PlaybackMode, PlaybackSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// Session-scoped playback state
///
/// Invariants:
/// - `position` is `None` exactly when the queue is empty
/// - otherwise `position < queue.len()`
/// - the current track is always `queue[position]`, never stored separately
///
/// Every operation is total: out-of-range indices are clamped and
/// navigation on an empty queue leaves the position untouched.
pub struct PlaybackState {
    queue: Vec<Track>,
    position: Option<usize>,
    playing: bool,
    volume: f32,
    mode: PlaybackMode,
    rng: StdRng,
    pending_changes: Vec<StateChange>,
}

impl PlaybackState {
    /// Create an empty, paused state
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a state whose shuffle picks are reproducible
    pub fn with_rng_seed(config: PlaybackConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlaybackConfig, rng: StdRng) -> Self {
        Self {
            queue: Vec::new(),
            position: None,
            playing: false,
            volume: clamp_volume(config.volume),
            mode: config.mode,
            rng,
            pending_changes: Vec::new(),
        }
    }

    // ===== Transitions =====

    /// Replace the queue and select `start_index` (clamped into range)
    ///
    /// The intent is left as it was.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        let previous = self.current().cloned();

        self.queue = tracks;
        self.position = clamp_index(start_index, self.queue.len());

        debug!(
            "Queue replaced: {} tracks, position {:?}",
            self.queue.len(),
            self.position
        );

        self.pending_changes.push(StateChange::QueueChanged {
            length: self.queue.len(),
        });

        let current = self.current().cloned();
        if current != previous {
            self.emit_track_changed(previous, current);
        }
    }

    /// Set the intent to playing, optionally selecting `index` first
    ///
    /// An out-of-range index selects the nearest valid one. Selecting the
    /// track that is already current does not count as a track change.
    pub fn play(&mut self, index: Option<usize>) {
        if let Some(index) = index {
            if !self.queue.is_empty() {
                let previous = self.current().cloned();
                self.position = clamp_index(index, self.queue.len());

                let current = self.current().cloned();
                if current != previous {
                    self.emit_track_changed(previous, current);
                }
            }
        }

        self.set_intent(true);
    }

    /// Set the intent to paused; the position never moves
    pub fn pause(&mut self) {
        self.set_intent(false);
    }

    /// Flip the intent
    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play(None);
        }
    }

    /// Advance to the next track according to the mode, then play
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.advance(Step::Forward);
    }

    /// Go back to the previous track according to the mode, then play
    pub fn prev(&mut self) {
        self.advance(Step::Backward);
    }

    /// Store the volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        if volume != self.volume {
            self.volume = volume;
            self.pending_changes
                .push(StateChange::VolumeChanged { volume });
        }
    }

    /// Store the advance policy
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        if mode != self.mode {
            debug!("Mode changed: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.pending_changes.push(StateChange::ModeChanged { mode });
        }
    }

    // ===== Queries =====

    /// Currently selected track
    pub fn current(&self) -> Option<&Track> {
        self.position.and_then(|i| self.queue.get(i))
    }

    /// The whole queue, in order
    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    /// Index of the current track
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Play/pause intent
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Stored volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Advance policy
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Owned view for UI collaborators
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current: self.current().cloned(),
            position: self.position,
            playing: self.playing,
            mode: self.mode,
            volume: self.volume,
            queue_len: self.queue.len(),
        }
    }

    // ===== Change notifications =====

    /// Take every change recorded since the last drain, oldest first
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.pending_changes)
    }

    /// Check if there are changes waiting to be drained
    pub fn has_pending_changes(&self) -> bool {
        !self.pending_changes.is_empty()
    }

    // ===== Internal =====

    fn advance(&mut self, step: Step) {
        let len = self.queue.len();
        if len > 0 {
            let previous = self.current().cloned();
            let from = self.position.unwrap_or(0);

            let to = match self.mode {
                PlaybackMode::Shuffle => self.rng.gen_range(0..len),
                PlaybackMode::RepeatAll | PlaybackMode::RepeatOne => match step {
                    Step::Forward => (from + 1) % len,
                    Step::Backward => (from + len - 1) % len,
                },
            };

            debug!("Advance {:?} ({}): {} -> {}", step, self.mode, from, to);
            self.position = Some(to);

            // A reselect still counts: the observer reloads the same source.
            let current = self.current().cloned();
            self.emit_track_changed(previous, current);
        }

        self.set_intent(true);
    }

    fn set_intent(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.pending_changes
                .push(StateChange::IntentChanged { playing });
        }
    }

    fn emit_track_changed(&mut self, previous: Option<Track>, current: Option<Track>) {
        self.pending_changes
            .push(StateChange::TrackChanged { previous, current });
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl fmt::Debug for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackState")
            .field("queue_len", &self.queue.len())
            .field("position", &self.position)
            .field("playing", &self.playing)
            .field("volume", &self.volume)
            .field("mode", &self.mode)
            .field("pending_changes", &self.pending_changes.len())
            .finish_non_exhaustive()
    }
}

fn clamp_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index.min(len - 1))
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), format!("/audio/{}.flac", id), 180.0)
    }

    fn abc() -> Vec<Track> {
        vec![track("0"), track("1"), track("2")]
    }

    fn current_id(state: &PlaybackState) -> Option<&str> {
        state.current().map(|t| t.id.as_str())
    }

    #[test]
    fn new_state_is_empty_and_paused() {
        let state = PlaybackState::default();
        assert!(state.queue().is_empty());
        assert_eq!(state.position(), None);
        assert!(state.current().is_none());
        assert!(!state.is_playing());
        assert_eq!(state.volume(), 0.8);
        assert_eq!(state.mode(), PlaybackMode::RepeatAll);
    }

    #[test]
    fn set_queue_clamps_start_and_keeps_intent() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 10);
        assert_eq!(state.position(), Some(2));
        assert_eq!(current_id(&state), Some("2"));
        assert!(!state.is_playing());

        state.play(None);
        state.set_queue(abc(), 1);
        assert_eq!(current_id(&state), Some("1"));
        assert!(state.is_playing());
    }

    #[test]
    fn set_queue_empty_clears_position() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 0);
        state.drain_changes();

        state.set_queue(Vec::new(), 0);
        assert_eq!(state.position(), None);
        assert!(state.current().is_none());

        let changes = state.drain_changes();
        assert_eq!(
            changes,
            vec![
                StateChange::QueueChanged { length: 0 },
                StateChange::TrackChanged {
                    previous: Some(track("0")),
                    current: None
                },
            ]
        );
    }

    #[test]
    fn play_with_index_clamps_to_last() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 0);
        state.play(Some(99));
        assert_eq!(state.position(), Some(2));
        assert!(state.is_playing());
    }

    #[test]
    fn play_with_index_on_empty_queue_only_sets_intent() {
        let mut state = PlaybackState::default();
        state.play(Some(3));
        assert_eq!(state.position(), None);
        assert!(state.is_playing());
        assert_eq!(
            state.drain_changes(),
            vec![StateChange::IntentChanged { playing: true }]
        );
    }

    #[test]
    fn play_current_index_is_not_a_track_change() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 1);
        state.drain_changes();

        state.play(Some(1));
        assert_eq!(
            state.drain_changes(),
            vec![StateChange::IntentChanged { playing: true }]
        );
    }

    #[test]
    fn pause_then_play_keeps_position() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 2);
        state.play(None);
        state.pause();
        assert!(!state.is_playing());
        assert_eq!(state.position(), Some(2));

        state.play(None);
        assert!(state.is_playing());
        assert_eq!(state.position(), Some(2));
    }

    #[test]
    fn sequential_next_wraps_through_queue() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 0);
        state.play(None);

        state.next();
        assert_eq!(current_id(&state), Some("1"));
        assert!(state.is_playing());
        state.next();
        assert_eq!(current_id(&state), Some("2"));
        state.next();
        assert_eq!(current_id(&state), Some("0"));
        assert_eq!(state.position(), Some(0));
    }

    #[test]
    fn prev_wraps_backwards() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 0);
        state.prev();
        assert_eq!(state.position(), Some(2));
        assert!(state.is_playing());
    }

    #[test]
    fn repeat_one_steps_like_sequential() {
        let mut state = PlaybackState::default();
        state.set_mode(PlaybackMode::RepeatOne);
        state.set_queue(abc(), 2);
        state.next();
        assert_eq!(state.position(), Some(0));
        state.prev();
        assert_eq!(state.position(), Some(2));
    }

    #[test]
    fn next_on_empty_queue_sets_intent_only() {
        let mut state = PlaybackState::default();
        state.next();
        assert_eq!(state.position(), None);
        assert!(state.current().is_none());
        assert!(state.is_playing());
        assert_eq!(
            state.drain_changes(),
            vec![StateChange::IntentChanged { playing: true }]
        );
    }

    #[test]
    fn shuffle_stays_in_range_and_is_seedable() {
        let mut a = PlaybackState::with_rng_seed(PlaybackConfig::default(), 7);
        let mut b = PlaybackState::with_rng_seed(PlaybackConfig::default(), 7);
        for state in [&mut a, &mut b] {
            state.set_mode(PlaybackMode::Shuffle);
            state.set_queue(abc(), 0);
        }

        for _ in 0..50 {
            a.next();
            b.prev();
            assert!(a.position().unwrap() < 3);
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn shuffle_on_single_track_reselects_it() {
        let mut state = PlaybackState::default();
        state.set_mode(PlaybackMode::Shuffle);
        state.set_queue(vec![track("solo")], 0);
        state.play(None);
        state.drain_changes();

        state.next();
        assert_eq!(state.position(), Some(0));
        assert_eq!(
            state.drain_changes(),
            vec![StateChange::TrackChanged {
                previous: Some(track("solo")),
                current: Some(track("solo")),
            }]
        );
    }

    #[test]
    fn volume_is_clamped() {
        let mut state = PlaybackState::default();
        state.set_volume(-1.0);
        assert_eq!(state.volume(), 0.0);
        state.set_volume(2.0);
        assert_eq!(state.volume(), 1.0);
        state.set_volume(0.37);
        assert_eq!(state.volume(), 0.37);
        state.set_volume(f32::NAN);
        assert_eq!(state.volume(), 0.0);
    }

    #[test]
    fn set_mode_records_change_once() {
        let mut state = PlaybackState::default();
        state.set_mode(PlaybackMode::Shuffle);
        state.set_mode(PlaybackMode::Shuffle);
        assert_eq!(
            state.drain_changes(),
            vec![StateChange::ModeChanged {
                mode: PlaybackMode::Shuffle
            }]
        );
        assert!(!state.has_pending_changes());
    }

    #[test]
    fn toggle_flips_intent() {
        let mut state = PlaybackState::default();
        state.toggle();
        assert!(state.is_playing());
        state.toggle();
        assert!(!state.is_playing());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut state = PlaybackState::default();
        state.set_queue(abc(), 1);
        state.play(None);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.current, Some(track("1")));
        assert_eq!(snapshot.position, Some(1));
        assert!(snapshot.playing);
        assert_eq!(snapshot.queue_len, 3);
    }
}
