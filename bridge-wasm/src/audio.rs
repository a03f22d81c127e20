//! WebAssembly implementation of the `MediaEngine` bridge trait.
//!
//! Wraps a single `HTMLAudioElement`. Listeners are `wasm_bindgen` closures
//! registered under the DOM event names; the closures stay owned by the
//! engine until their listener is removed.

use crate::error::{describe_js_value, WasmResult};
use bridge_traits::{ListenerId, MediaEngine, MediaErrorCode, MediaEventHandler, MediaEventKind};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, HtmlAudioElement};

/// DOM event name for a lifecycle event kind.
pub fn dom_event_name(kind: MediaEventKind) -> &'static str {
    match kind {
        MediaEventKind::Ended => "ended",
        MediaEventKind::Error => "error",
        MediaEventKind::Play => "play",
        MediaEventKind::Playing => "playing",
        MediaEventKind::Pause => "pause",
        MediaEventKind::TimeUpdate => "timeupdate",
        MediaEventKind::CanPlay => "canplay",
        MediaEventKind::LoadMetadata => "loadedmetadata",
        MediaEventKind::LoadStart => "loadstart",
    }
}

struct Registration {
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Media engine backed by an `HTMLAudioElement`.
pub struct HtmlAudioEngine {
    element: HtmlAudioElement,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<u64, Registration>>,
    // A closure may remove its own listener while it runs, so removed closures
    // are parked here and dropped on a later call instead.
    retired: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

impl HtmlAudioEngine {
    /// Creates an engine around a fresh, detached `new Audio()` element.
    pub fn new() -> WasmResult<Self> {
        let element = HtmlAudioElement::new()?;
        Ok(Self::from_element(element))
    }

    /// Creates an engine around an existing element, e.g. one in the page.
    pub fn from_element(element: HtmlAudioElement) -> Self {
        Self {
            element,
            next_id: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
            retired: RefCell::new(Vec::new()),
        }
    }

    /// The wrapped element.
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn drop_retired(&self) {
        self.retired.borrow_mut().clear();
    }

    fn detach(&self, registration: &Registration) {
        if let Err(err) = self.element.remove_event_listener_with_callback(
            registration.event,
            registration.closure.as_ref().unchecked_ref(),
        ) {
            warn!(
                event = registration.event,
                error = %describe_js_value(&err),
                "Failed to remove media listener"
            );
        }
    }
}

impl MediaEngine for HtmlAudioEngine {
    fn set_source(&self, url: &str) {
        self.drop_retired();
        self.element.set_src(url);
    }

    fn load(&self) {
        self.element.load();
    }

    fn play(&self) {
        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(err) => {
                warn!(error = %describe_js_value(&err), "play() threw");
                return;
            }
        };

        // Autoplay policies and aborted loads reject this promise. The element
        // raises its own `error` event for real media failures.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                debug!(error = %describe_js_value(&err), "play() promise rejected");
            }
        });
    }

    fn pause(&self) {
        if let Err(err) = self.element.pause() {
            warn!(error = %describe_js_value(&err), "pause() threw");
        }
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        if duration.is_nan() {
            None
        } else {
            Some(duration)
        }
    }

    fn add_listener(&self, kind: MediaEventKind, handler: MediaEventHandler) -> ListenerId {
        self.drop_retired();

        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let event = dom_event_name(kind);
        let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler(kind));
        if let Err(err) = self
            .element
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            warn!(event, error = %describe_js_value(&err), "Failed to add media listener");
        }

        self.listeners
            .borrow_mut()
            .insert(id, Registration { event, closure });
        ListenerId::new(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id.get());
        if let Some(registration) = removed {
            self.detach(&registration);
            self.retired.borrow_mut().push(registration.closure);
        }
    }

    fn last_error(&self) -> Option<MediaErrorCode> {
        self.element
            .error()
            .and_then(|error| MediaErrorCode::from_code(error.code()))
    }
}

impl Drop for HtmlAudioEngine {
    fn drop(&mut self) {
        for (_, registration) in self.listeners.borrow_mut().drain() {
            self.detach(&registration);
        }
        let _ = self.element.pause();
        self.element.remove_attribute("src").ok();
    }
}
