//! In-memory media engine for driving sessions from tests.

#![allow(dead_code)]

use bridge_traits::{ListenerId, MediaEngine, MediaErrorCode, MediaEventHandler, MediaEventKind};
use std::sync::{Arc, Mutex};

/// Engine call recorded by [`FakeMediaEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    SetSource(String),
    Load,
    Play,
    Pause,
    SetCurrentTime(f64),
    AddListener(MediaEventKind),
    RemoveListener(ListenerId),
}

#[derive(Default)]
struct Inner {
    source: Option<String>,
    current_time: f64,
    duration: Option<f64>,
    last_error: Option<MediaErrorCode>,
    next_listener: u64,
    listeners: Vec<(ListenerId, MediaEventKind, MediaEventHandler)>,
    detached: Vec<(MediaEventKind, MediaEventHandler)>,
    calls: Vec<EngineCall>,
}

/// Engine that raises events synchronously when told to.
///
/// Handlers are invoked without holding the internal lock, so they may call
/// back into the engine the way real listeners do.
#[derive(Default)]
pub struct FakeMediaEngine {
    inner: Mutex<Inner>,
}

impl FakeMediaEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Raises `kind` on every listener registered for it.
    pub fn emit(&self, kind: MediaEventKind) {
        let handlers: Vec<MediaEventHandler> = {
            let inner = self.inner.lock().unwrap();
            inner
                .listeners
                .iter()
                .filter(|(_, registered, _)| *registered == kind)
                .map(|(_, _, handler)| Arc::clone(handler))
                .collect()
        };
        for handler in handlers {
            handler(kind);
        }
    }

    /// Invokes handlers that were already removed, as if the engine had
    /// queued `kind` for them before they were detached.
    pub fn emit_to_detached(&self, kind: MediaEventKind) {
        let handlers: Vec<MediaEventHandler> = {
            let inner = self.inner.lock().unwrap();
            inner
                .detached
                .iter()
                .filter(|(registered, _)| *registered == kind)
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };
        for handler in handlers {
            handler(kind);
        }
    }

    /// Records `code` and raises `error`.
    pub fn fail(&self, code: MediaErrorCode) {
        self.inner.lock().unwrap().last_error = Some(code);
        self.emit(MediaEventKind::Error);
    }

    /// Sets the reported duration without recording a call.
    pub fn set_duration(&self, duration: Option<f64>) {
        self.inner.lock().unwrap().duration = duration;
    }

    /// Moves the reported position without recording a call.
    pub fn advance_to(&self, seconds: f64) {
        self.inner.lock().unwrap().current_time = seconds;
    }

    pub fn source(&self) -> Option<String> {
        self.inner.lock().unwrap().source.clone()
    }

    pub fn position(&self) -> f64 {
        self.inner.lock().unwrap().current_time
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    fn record(&self, call: EngineCall) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

impl MediaEngine for FakeMediaEngine {
    fn set_source(&self, url: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.source = Some(url.to_string());
        inner.current_time = 0.0;
        inner.duration = None;
        inner.calls.push(EngineCall::SetSource(url.to_string()));
    }

    fn load(&self) {
        self.record(EngineCall::Load);
    }

    fn play(&self) {
        self.record(EngineCall::Play);
    }

    fn pause(&self) {
        self.record(EngineCall::Pause);
    }

    fn current_time(&self) -> f64 {
        self.inner.lock().unwrap().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.current_time = seconds;
        inner.calls.push(EngineCall::SetCurrentTime(seconds));
    }

    fn duration(&self) -> Option<f64> {
        self.inner.lock().unwrap().duration
    }

    fn add_listener(&self, kind: MediaEventKind, handler: MediaEventHandler) -> ListenerId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_listener += 1;
        let id = ListenerId::new(inner.next_listener);
        inner.listeners.push((id, kind, handler));
        inner.calls.push(EngineCall::AddListener(kind));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(position) = inner.listeners.iter().position(|(listener, _, _)| *listener == id) {
            let (_, kind, handler) = inner.listeners.remove(position);
            inner.detached.push((kind, handler));
        }
        inner.calls.push(EngineCall::RemoveListener(id));
    }

    fn last_error(&self) -> Option<MediaErrorCode> {
        self.inner.lock().unwrap().last_error
    }
}
