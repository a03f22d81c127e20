//! # Playback Session
//!
//! Binds the media engine to one stream URL at a time.
//!
//! ## Lifecycle
//!
//! ```text
//! open(url) ──> teardown previous (Superseded) ──> reset state
//!           ──> register listeners ──> set_source / load / play
//!
//!   engine event ──> translator.apply ──> stream channel
//!                        │
//!                        └─ ended / error ──> teardown (Ended / Failed)
//!
//! stop() / drop(stream) ──> teardown (Stopped / Dropped)
//! ```
//!
//! Teardown pauses the engine, rewinds it to zero, detaches every listener
//! and resets the translator, in that order. The active slot is emptied under
//! its lock before any of that happens, so each session is released exactly
//! once no matter how many exit paths race for it.
//!
//! Each session carries two cancellation tokens. `stop` is observed by the
//! [`PlaybackStream`](crate::PlaybackStream) and ends it immediately; `listen`
//! is a child of `stop` and is observed by the event handler. Completion
//! (`Ended`/`Failed`) cancels only `listen`, which lets the stream drain the
//! events it already buffered, terminal event included.

use crate::event::{MediaEvent, SessionId};
use crate::translator::StateTranslator;
use bridge_traits::{
    ListenerId, MediaEngine, MediaErrorCode, MediaEventHandler, MediaEventKind,
};
use core_runtime::logging::redact_url;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Why a session was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownReason {
    /// `stop()` was called.
    Stopped,
    /// A new session was opened.
    Superseded,
    /// The session's stream was dropped.
    Dropped,
    /// The engine reported the end of the media.
    Ended,
    /// The engine reported an error.
    Failed,
}

impl TeardownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeardownReason::Stopped => "stopped",
            TeardownReason::Superseded => "superseded",
            TeardownReason::Dropped => "dropped",
            TeardownReason::Ended => "ended",
            TeardownReason::Failed => "failed",
        }
    }

    /// The engine finished the session on its own.
    pub fn is_completion(&self) -> bool {
        matches!(self, TeardownReason::Ended | TeardownReason::Failed)
    }

    /// The error snapshot must survive teardown.
    fn keeps_snapshot(&self) -> bool {
        matches!(self, TeardownReason::Failed)
    }
}

impl fmt::Display for TeardownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct ActiveSession {
    id: SessionId,
    url: String,
    stop: CancellationToken,
    listen: CancellationToken,
    listeners: Vec<ListenerId>,
}

/// Handles a stream needs from a freshly opened session.
pub(crate) struct OpenedSession {
    pub id: SessionId,
    pub stop: CancellationToken,
    pub events: mpsc::UnboundedReceiver<MediaEvent>,
}

/// Exclusive owner of the media engine.
pub struct PlaybackSession {
    engine: Arc<dyn MediaEngine>,
    translator: Arc<StateTranslator>,
    active: Mutex<Option<ActiveSession>>,
}

impl PlaybackSession {
    pub fn new(engine: Arc<dyn MediaEngine>, translator: Arc<StateTranslator>) -> Self {
        Self {
            engine,
            translator,
            active: Mutex::new(None),
        }
    }

    /// Opens a session for `url`, releasing any previous one first.
    pub(crate) fn open(self: &Arc<Self>, url: &str) -> OpenedSession {
        self.release_active(TeardownReason::Superseded);
        self.translator.reset();

        let id = SessionId::new();
        let stop = CancellationToken::new();
        let listen = stop.child_token();
        let (tx, events) = mpsc::unbounded_channel();

        let handler = self.event_handler(id, listen.clone(), tx);
        let listeners = MediaEventKind::ALL
            .iter()
            .map(|&kind| self.engine.add_listener(kind, Arc::clone(&handler)))
            .collect();

        // Listeners go in before the engine starts, and the slot is filled
        // before it starts too, so an event raised from inside play() already
        // finds its session.
        let raced = self.active.lock().replace(ActiveSession {
            id,
            url: url.to_string(),
            stop: stop.clone(),
            listen,
            listeners,
        });
        if let Some(previous) = raced {
            self.release(previous, TeardownReason::Superseded);
        }

        info!(session_id = %id, url = %redact_url(url), "Opening playback session");
        self.engine.set_source(url);
        self.engine.load();
        self.engine.play();

        OpenedSession { id, stop, events }
    }

    fn event_handler(
        self: &Arc<Self>,
        id: SessionId,
        listen: CancellationToken,
        tx: mpsc::UnboundedSender<MediaEvent>,
    ) -> MediaEventHandler {
        let owner: Weak<Self> = Arc::downgrade(self);
        Arc::new(move |kind: MediaEventKind| {
            let Some(session) = owner.upgrade() else {
                return;
            };
            if listen.is_cancelled() {
                trace!(session_id = %id, event = %kind, "Dropping event from closed session");
                return;
            }

            let event = MediaEvent::capture(kind, id, session.engine.as_ref());
            if !session.translator.apply_unless_closed(&event, &listen) {
                trace!(session_id = %id, event = %kind, "Dropping event from closed session");
                return;
            }
            debug!(
                session_id = %id,
                event = %kind,
                current_time = event.current_time,
                "Media event"
            );

            // The stream may be gone already; the state was still updated.
            let _ = tx.send(event);

            match kind {
                MediaEventKind::Error => {
                    warn!(
                        session_id = %id,
                        error = ?session.engine.last_error(),
                        "Media engine reported an error"
                    );
                    session.teardown(id, TeardownReason::Failed);
                }
                MediaEventKind::Ended => {
                    session.teardown(id, TeardownReason::Ended);
                }
                _ => {}
            }
        })
    }

    /// Releases session `id` if it is still the active one.
    ///
    /// Returns `false` when the session was already released.
    pub fn teardown(&self, id: SessionId, reason: TeardownReason) -> bool {
        let session = {
            let mut active = self.active.lock();
            match active.as_ref() {
                Some(current) if current.id == id => active.take(),
                _ => None,
            }
        };

        match session {
            Some(session) => {
                self.release(session, reason);
                true
            }
            None => false,
        }
    }

    fn release_active(&self, reason: TeardownReason) -> Option<SessionId> {
        let session = self.active.lock().take()?;
        let id = session.id;
        self.release(session, reason);
        Some(id)
    }

    fn release(&self, session: ActiveSession, reason: TeardownReason) {
        if reason.is_completion() {
            session.listen.cancel();
        } else {
            session.stop.cancel();
        }

        self.engine.pause();
        self.engine.set_current_time(0.0);
        for listener in &session.listeners {
            self.engine.remove_listener(*listener);
        }
        if !reason.keeps_snapshot() {
            self.translator.reset();
        }

        info!(
            session_id = %session.id,
            url = %redact_url(&session.url),
            reason = %reason,
            "Playback session closed"
        );
    }

    /// Cancels the active session. Does nothing when there is none.
    pub fn stop(&self) {
        if self.release_active(TeardownReason::Stopped).is_none() {
            debug!("stop() ignored: no active session");
        }
    }

    /// Resumes the active session.
    pub fn play(&self) {
        if self.has_active_session("play") {
            self.engine.play();
        }
    }

    /// Pauses the active session.
    pub fn pause(&self) {
        if self.has_active_session("pause") {
            self.engine.pause();
        }
    }

    /// Moves the playback position of the active session.
    ///
    /// Negative values seek to zero and values past a known duration seek to
    /// the end. Non-finite values are ignored.
    pub fn seek_to(&self, seconds: f64) {
        if !self.has_active_session("seek_to") {
            return;
        }
        if !seconds.is_finite() {
            warn!(seconds, "seek_to() ignored: position is not finite");
            return;
        }

        let target = match self.engine.duration() {
            Some(duration) if duration.is_finite() && duration >= 0.0 => {
                seconds.clamp(0.0, duration)
            }
            _ => seconds.max(0.0),
        };
        self.engine.set_current_time(target);
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active.lock().as_ref().map(|session| session.id)
    }

    /// URL of the active session.
    pub fn active_url(&self) -> Option<String> {
        self.active.lock().as_ref().map(|session| session.url.clone())
    }

    /// Last error the engine reported, for diagnostics.
    pub fn last_media_error(&self) -> Option<MediaErrorCode> {
        self.engine.last_error()
    }

    fn has_active_session(&self, operation: &'static str) -> bool {
        let active = self.active.lock().is_some();
        if !active {
            debug!(operation, "Control call ignored: no active session");
        }
        active
    }
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("active_session", &self.active_session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::{mock, predicate::eq, Sequence};

    mock! {
        Engine {}

        impl MediaEngine for Engine {
            fn set_source(&self, url: &str);
            fn load(&self);
            fn play(&self);
            fn pause(&self);
            fn current_time(&self) -> f64;
            fn set_current_time(&self, seconds: f64);
            fn duration(&self) -> Option<f64>;
            fn add_listener(&self, kind: MediaEventKind, handler: MediaEventHandler) -> ListenerId;
            fn remove_listener(&self, id: ListenerId);
            fn last_error(&self) -> Option<MediaErrorCode>;
        }
    }

    fn session_with(engine: MockEngine) -> Arc<PlaybackSession> {
        Arc::new(PlaybackSession::new(
            Arc::new(engine),
            Arc::new(StateTranslator::default()),
        ))
    }

    #[test]
    fn test_open_registers_listeners_before_starting_engine() {
        let mut engine = MockEngine::new();
        let mut seq = Sequence::new();

        for (index, kind) in MediaEventKind::ALL.into_iter().enumerate() {
            engine
                .expect_add_listener()
                .withf(move |registered, _| *registered == kind)
                .times(1)
                .in_sequence(&mut seq)
                .return_const(ListenerId::new(index as u64));
        }
        engine
            .expect_set_source()
            .withf(|url| url == "https://cdn.example/a.mp3")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        engine
            .expect_load()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        engine
            .expect_play()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let session = session_with(engine);
        let opened = session.open("https://cdn.example/a.mp3");
        assert_eq!(session.active_session(), Some(opened.id));
        assert_eq!(
            session.active_url().as_deref(),
            Some("https://cdn.example/a.mp3")
        );
    }

    #[test]
    fn test_stop_releases_in_order() {
        let mut engine = MockEngine::new();
        let mut seq = Sequence::new();

        engine
            .expect_add_listener()
            .times(9)
            .returning(|kind, _| ListenerId::new(kind as u64));
        engine.expect_set_source().return_const(());
        engine.expect_load().return_const(());
        engine.expect_play().return_const(());

        engine
            .expect_pause()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        engine
            .expect_set_current_time()
            .with(eq(0.0))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        engine
            .expect_remove_listener()
            .times(9)
            .in_sequence(&mut seq)
            .return_const(());

        let session = session_with(engine);
        let opened = session.open("a.mp3");

        session.stop();
        assert!(opened.stop.is_cancelled());
        assert_eq!(session.active_session(), None);

        // Idempotent: nothing else reaches the engine.
        session.stop();
        assert!(!session.teardown(opened.id, TeardownReason::Dropped));
    }

    #[test]
    fn test_controls_without_session_do_not_touch_engine() {
        // No expectations: any engine call fails the test.
        let session = session_with(MockEngine::new());

        session.play();
        session.pause();
        session.seek_to(10.0);
        session.stop();
        assert_eq!(session.active_session(), None);
    }

    #[test]
    fn test_seek_is_clamped_to_duration() {
        let mut engine = MockEngine::new();
        engine
            .expect_add_listener()
            .returning(|kind, _| ListenerId::new(kind as u64));
        engine.expect_set_source().return_const(());
        engine.expect_load().return_const(());
        engine.expect_play().return_const(());
        engine.expect_duration().return_const(Some(180.0));

        let mut seq = Sequence::new();
        for target in [180.0, 0.0, 42.5] {
            engine
                .expect_set_current_time()
                .with(eq(target))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }

        let session = session_with(engine);
        let _opened = session.open("a.mp3");

        session.seek_to(500.0);
        session.seek_to(-3.0);
        session.seek_to(f64::NAN);
        session.seek_to(42.5);
    }

    #[test]
    fn test_reason_properties() {
        assert!(TeardownReason::Ended.is_completion());
        assert!(TeardownReason::Failed.is_completion());
        assert!(!TeardownReason::Stopped.is_completion());
        assert!(TeardownReason::Failed.keeps_snapshot());
        assert!(!TeardownReason::Superseded.keeps_snapshot());
        assert_eq!(TeardownReason::Dropped.to_string(), "dropped");
    }
}
