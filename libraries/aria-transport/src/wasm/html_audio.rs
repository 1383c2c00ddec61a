//! `HtmlAudioElement` transport

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{DomException, HtmlAudioElement};

use crate::error::TransportError;
use crate::transport::{AudioTransport, PlayGeneration, TransportEvent};

type EventQueue = Rc<RefCell<VecDeque<TransportEvent>>>;
type PromiseCallback = Closure<dyn FnMut(JsValue)>;

/// Audio transport backed by a browser `<audio>` element
///
/// Media events are queued by DOM listeners and handed out by
/// [`AudioTransport::poll_events`]; `play()` promises settle into
/// [`TransportEvent::PlaySettled`].
pub struct HtmlAudioTransport {
    audio: HtmlAudioElement,
    events: EventQueue,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,

    /// Callbacks attached to unsettled `play()` promises
    play_callbacks: Vec<(PlayGeneration, (PromiseCallback, PromiseCallback))>,
}

impl HtmlAudioTransport {
    /// Create a detached `<audio>` element and bind to it
    pub fn new() -> Result<Self, TransportError> {
        let audio = HtmlAudioElement::new().map_err(|e| TransportError::Backend(describe(&e)))?;
        audio.set_preload("metadata");
        Self::from_element(audio)
    }

    /// Bind to an existing `<audio>` element
    pub fn from_element(audio: HtmlAudioElement) -> Result<Self, TransportError> {
        let mut transport = Self {
            audio,
            events: Rc::new(RefCell::new(VecDeque::new())),
            listeners: Vec::new(),
            play_callbacks: Vec::new(),
        };

        let events = transport.events.clone();
        let element = transport.audio.clone();
        transport.listen("timeupdate", move || {
            events.borrow_mut().push_back(TransportEvent::TimeUpdate {
                current_time: element.current_time(),
                duration: element.duration(),
            });
        })?;

        let events = transport.events.clone();
        transport.listen("canplay", move || {
            events.borrow_mut().push_back(TransportEvent::CanPlay);
        })?;

        let events = transport.events.clone();
        transport.listen("ended", move || {
            events.borrow_mut().push_back(TransportEvent::Ended);
        })?;

        Ok(transport)
    }

    /// Underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    fn listen(
        &mut self,
        event: &'static str,
        handler: impl FnMut() + 'static,
    ) -> Result<(), TransportError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        self.audio
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| TransportError::Backend(describe(&e)))?;
        self.listeners.push((event, closure));
        Ok(())
    }
}

impl AudioTransport for HtmlAudioTransport {
    fn load(&mut self, url: &str) {
        debug!("<audio> src = {}", url);
        self.audio.set_src(url);
    }

    fn unload(&mut self) {
        if let Err(e) = self.audio.remove_attribute("src") {
            warn!("Failed to clear <audio> source: {}", describe(&e));
        }
        // Reloading without a src releases the previous media resource.
        self.audio.load();
    }

    fn play(&mut self, generation: PlayGeneration) {
        let promise = match self.audio.play() {
            Ok(promise) => promise,
            Err(e) => {
                self.events
                    .borrow_mut()
                    .push_back(TransportEvent::rejected(generation, play_error(&e)));
                return;
            }
        };

        let events = self.events.clone();
        let on_started = Closure::wrap(Box::new(move |_: JsValue| {
            events
                .borrow_mut()
                .push_back(TransportEvent::started(generation));
        }) as Box<dyn FnMut(JsValue)>);

        let events = self.events.clone();
        let on_rejected = Closure::wrap(Box::new(move |reason: JsValue| {
            events
                .borrow_mut()
                .push_back(TransportEvent::rejected(generation, play_error(&reason)));
        }) as Box<dyn FnMut(JsValue)>);

        let _ = promise.then2(&on_started, &on_rejected);
        self.play_callbacks
            .push((generation, (on_started, on_rejected)));
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            warn!("Failed to pause <audio>: {}", describe(&e));
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        let duration = self.audio.duration();
        if duration.is_finite() {
            duration
        } else {
            0.0
        }
    }

    fn volume(&self) -> f32 {
        self.audio.volume() as f32
    }

    fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(f64::from(volume));
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        let events: Vec<TransportEvent> = self.events.borrow_mut().drain(..).collect();
        release_settled(&mut self.play_callbacks, &events);
        events
    }
}

impl Drop for HtmlAudioTransport {
    fn drop(&mut self) {
        for (event, closure) in self.listeners.drain(..) {
            let _ = self
                .audio
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }

        // Promises still pending may settle after the transport is gone.
        for (_, (on_started, on_rejected)) in self.play_callbacks.drain(..) {
            on_started.forget();
            on_rejected.forget();
        }
    }
}

/// Drop the callbacks of every request settled in `events`
///
/// A settled promise never calls back again. Runs outside the callbacks
/// themselves, so nothing is freed while it executes.
fn release_settled<C>(callbacks: &mut Vec<(PlayGeneration, C)>, events: &[TransportEvent]) {
    for event in events {
        if let TransportEvent::PlaySettled { generation, .. } = event {
            callbacks.retain(|(g, _)| g != generation);
        }
    }
}

/// Map a `play()` rejection to a transport error
///
/// Browsers reject with `NotAllowedError` when autoplay policy blocks a
/// start without a user gesture.
fn play_error(reason: &JsValue) -> TransportError {
    match reason.dyn_ref::<DomException>() {
        Some(exception) if exception.name() == "NotAllowedError" => {
            TransportError::NotAllowed(exception.message())
        }
        Some(exception) => {
            TransportError::PlayRejected(format!("{}: {}", exception.name(), exception.message()))
        }
        None => TransportError::PlayRejected(describe(reason)),
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
