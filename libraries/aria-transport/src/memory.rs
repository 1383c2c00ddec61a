//! In-memory audio transport
//!
//! Records every command and lets the caller decide when and how play
//! requests settle. Used by the test suites and by headless hosts that only
//! need the state machine.

use std::collections::VecDeque;

use crate::error::TransportError;
use crate::transport::{AudioTransport, PlayGeneration, TransportEvent};

/// Command received by a [`MemoryTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    /// `load(url)`
    Load(String),
    /// `unload()`
    Unload,
    /// `play(generation)`
    Play(PlayGeneration),
    /// `pause()`
    Pause,
    /// `set_current_time(seconds)`
    Seek(f64),
    /// `set_volume(volume)`
    SetVolume(f32),
}

/// How a [`MemoryTransport`] answers play requests
#[derive(Debug, Clone, PartialEq)]
pub enum PlayPolicy {
    /// Keep requests pending until [`MemoryTransport::settle`] is called
    Manual,
    /// Settle every request successfully right away
    AutoStart,
    /// Reject every request with this error
    Reject(TransportError),
}

/// Audio transport that keeps everything in memory
#[derive(Debug)]
pub struct MemoryTransport {
    source: Option<String>,
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f32,
    policy: PlayPolicy,
    commands: Vec<TransportCommand>,
    pending_plays: Vec<PlayGeneration>,
    events: VecDeque<TransportEvent>,
}

impl MemoryTransport {
    /// Transport whose play requests stay pending
    pub fn new() -> Self {
        Self::with_policy(PlayPolicy::Manual)
    }

    /// Transport answering play requests according to `policy`
    pub fn with_policy(policy: PlayPolicy) -> Self {
        Self {
            source: None,
            paused: true,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            policy,
            commands: Vec::new(),
            pending_plays: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// Change how future play requests are answered
    pub fn set_policy(&mut self, policy: PlayPolicy) {
        self.policy = policy;
    }

    /// Settle a pending play request
    ///
    /// Returns false if `generation` was not pending.
    pub fn settle(&mut self, generation: PlayGeneration, result: Result<(), TransportError>) -> bool {
        let Some(index) = self.pending_plays.iter().position(|g| *g == generation) else {
            return false;
        };
        self.pending_plays.remove(index);
        self.finish_play(generation, result);
        true
    }

    /// Settle the most recent pending play request
    pub fn settle_latest(&mut self, result: Result<(), TransportError>) -> Option<PlayGeneration> {
        let generation = self.pending_plays.pop()?;
        self.finish_play(generation, result);
        Some(generation)
    }

    /// Queue an arbitrary event
    pub fn emit(&mut self, event: TransportEvent) {
        self.events.push_back(event);
    }

    /// Report media metadata: sets the duration and raises `canplay`
    pub fn buffer(&mut self, duration: f64) {
        self.duration = duration;
        self.events.push_back(TransportEvent::CanPlay);
    }

    /// Move the clock forward and raise `timeupdate`
    pub fn advance(&mut self, seconds: f64) {
        self.current_time = (self.current_time + seconds).min(self.duration.max(0.0));
        self.events.push_back(TransportEvent::TimeUpdate {
            current_time: self.current_time,
            duration: self.duration,
        });
    }

    /// Play to the end of the source and raise `ended`
    pub fn finish(&mut self) {
        self.current_time = self.duration;
        self.paused = true;
        self.events.push_back(TransportEvent::Ended);
    }

    /// Every command received so far
    pub fn commands(&self) -> &[TransportCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<TransportCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Play requests that have not settled yet, oldest first
    pub fn pending_plays(&self) -> &[PlayGeneration] {
        &self.pending_plays
    }

    /// Loaded source
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether audio is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn finish_play(&mut self, generation: PlayGeneration, result: Result<(), TransportError>) {
        if result.is_ok() {
            self.paused = false;
        }
        self.events.push_back(TransportEvent::PlaySettled { generation, result });
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioTransport for MemoryTransport {
    fn load(&mut self, url: &str) {
        self.commands.push(TransportCommand::Load(url.to_string()));
        self.source = Some(url.to_string());
        self.paused = true;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    fn unload(&mut self) {
        self.commands.push(TransportCommand::Unload);
        self.source = None;
        self.paused = true;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    fn play(&mut self, generation: PlayGeneration) {
        self.commands.push(TransportCommand::Play(generation));

        if self.source.is_none() {
            self.finish_play(generation, Err(TransportError::NoSource));
            return;
        }

        match self.policy.clone() {
            PlayPolicy::Manual => self.pending_plays.push(generation),
            PlayPolicy::AutoStart => self.finish_play(generation, Ok(())),
            PlayPolicy::Reject(error) => self.finish_play(generation, Err(error)),
        }
    }

    fn pause(&mut self) {
        self.commands.push(TransportCommand::Pause);
        self.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.commands.push(TransportCommand::Seek(seconds));
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(TransportCommand::SetVolume(volume));
        self.volume = volume;
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        self.events.drain(..).collect()
    }
}
