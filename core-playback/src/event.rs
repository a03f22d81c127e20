//! Session identifiers and forwarded media events.

use bridge_traits::{MediaEngine, MediaEventKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lifecycle event raised by the engine during a session, together with the
/// engine readings taken when it was dispatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEvent {
    pub kind: MediaEventKind,
    pub session_id: SessionId,
    /// Playback position in seconds at dispatch time.
    pub current_time: f64,
    /// Media duration at dispatch time, `None` while unknown.
    pub duration: Option<f64>,
}

impl MediaEvent {
    pub fn new(kind: MediaEventKind, session_id: SessionId) -> Self {
        Self {
            kind,
            session_id,
            current_time: 0.0,
            duration: None,
        }
    }

    pub fn with_current_time(mut self, seconds: f64) -> Self {
        self.current_time = seconds;
        self
    }

    pub fn with_duration(mut self, seconds: Option<f64>) -> Self {
        self.duration = seconds;
        self
    }

    /// Reads position and duration from `engine` for an event it just raised.
    pub(crate) fn capture(
        kind: MediaEventKind,
        session_id: SessionId,
        engine: &dyn MediaEngine,
    ) -> Self {
        Self::new(kind, session_id)
            .with_current_time(engine.current_time())
            .with_duration(engine.duration())
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_event_builder() {
        let id = SessionId::new();
        let event = MediaEvent::new(MediaEventKind::CanPlay, id).with_duration(Some(180.0));
        assert_eq!(event.session_id, id);
        assert_eq!(event.duration, Some(180.0));
        assert_eq!(event.current_time, 0.0);
        assert!(!event.is_terminal());
        assert!(MediaEvent::new(MediaEventKind::Ended, id).is_terminal());
    }
}
