//! Media engine bridge trait and lifecycle event types.
//!
//! The core never decodes or outputs audio itself. It drives a host-provided
//! [`MediaEngine`] (an HTML media element in browsers, a native player on
//! desktop) and interprets the lifecycle events that engine raises. The trait
//! is intentionally synchronous: control calls only *request* a transition and
//! the engine reports the outcome later through its listeners.

use crate::platform::PlatformSendSync;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Lifecycle event kinds a session listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaEventKind {
    /// Playback reached the end of the media.
    Ended,
    /// The engine failed to fetch, decode or play the source.
    Error,
    /// Playback was requested (`play()` was called or autoplay kicked in).
    Play,
    /// Audio is actually being rendered.
    Playing,
    /// Playback was paused.
    Pause,
    /// The playback position advanced.
    TimeUpdate,
    /// Enough data is buffered to start playback.
    CanPlay,
    /// Duration and stream metadata are known.
    LoadMetadata,
    /// The engine started loading the source.
    LoadStart,
}

impl MediaEventKind {
    /// Every kind, in the order sessions register listeners for them.
    pub const ALL: [MediaEventKind; 9] = [
        MediaEventKind::Ended,
        MediaEventKind::Error,
        MediaEventKind::Play,
        MediaEventKind::Playing,
        MediaEventKind::Pause,
        MediaEventKind::TimeUpdate,
        MediaEventKind::CanPlay,
        MediaEventKind::LoadMetadata,
        MediaEventKind::LoadStart,
    ];

    /// Camel-case identifier of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            MediaEventKind::Ended => "ended",
            MediaEventKind::Error => "error",
            MediaEventKind::Play => "play",
            MediaEventKind::Playing => "playing",
            MediaEventKind::Pause => "pause",
            MediaEventKind::TimeUpdate => "timeUpdate",
            MediaEventKind::CanPlay => "canPlay",
            MediaEventKind::LoadMetadata => "loadMetadata",
            MediaEventKind::LoadStart => "loadStart",
        }
    }

    /// Returns `true` for kinds after which a session produces nothing useful.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MediaEventKind::Ended | MediaEventKind::Error)
    }
}

impl fmt::Display for MediaEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error codes reported by the engine, mirroring the HTML `MediaError` codes.
///
/// These are only available out-of-band through [`MediaEngine::last_error`];
/// the playback core itself does not distinguish between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaErrorCode {
    /// Fetching was aborted at the user's request.
    Aborted,
    /// A network error interrupted the fetch.
    Network,
    /// The media could not be decoded.
    Decode,
    /// The source format or URL is not supported.
    SourceNotSupported,
}

impl MediaErrorCode {
    /// Map a numeric `MediaError.code` value.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(MediaErrorCode::Aborted),
            2 => Some(MediaErrorCode::Network),
            3 => Some(MediaErrorCode::Decode),
            4 => Some(MediaErrorCode::SourceNotSupported),
            _ => None,
        }
    }
}

/// Opaque handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Construct an identifier from an engine-assigned value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Engine-assigned value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Callback invoked by the engine for each raised event.
#[cfg(not(target_arch = "wasm32"))]
pub type MediaEventHandler = Arc<dyn Fn(MediaEventKind) + Send + Sync>;

#[cfg(target_arch = "wasm32")]
pub type MediaEventHandler = Arc<dyn Fn(MediaEventKind)>;

/// Host media engine driving a single audio resource.
///
/// Implementations must invoke handlers in the order events occur and must
/// tolerate `remove_listener` being called from inside a handler.
pub trait MediaEngine: PlatformSendSync {
    /// Assign the source URL. Does not start fetching on its own.
    fn set_source(&self, url: &str);

    /// Begin (re)loading the assigned source.
    fn load(&self);

    /// Request playback. Failures are reported through an `Error` event.
    fn play(&self);

    /// Pause playback, keeping the current position.
    fn pause(&self);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position, in seconds.
    fn set_current_time(&self, seconds: f64);

    /// Media duration in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;

    /// Register `handler` for events of `kind`.
    fn add_listener(&self, kind: MediaEventKind, handler: MediaEventHandler) -> ListenerId;

    /// Unregister a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);

    /// Last error raised by the engine, for diagnostics.
    fn last_error(&self) -> Option<MediaErrorCode> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_kinds_are_distinct() {
        let unique: HashSet<_> = MediaEventKind::ALL.iter().collect();
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn only_ended_and_error_are_terminal() {
        let terminal: Vec<_> = MediaEventKind::ALL
            .iter()
            .filter(|kind| kind.is_terminal())
            .collect();
        assert_eq!(terminal, vec![&MediaEventKind::Ended, &MediaEventKind::Error]);
    }

    #[test]
    fn kind_serializes_as_camel_case_name() {
        for kind in MediaEventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(MediaErrorCode::from_code(2), Some(MediaErrorCode::Network));
        assert_eq!(
            MediaErrorCode::from_code(4),
            Some(MediaErrorCode::SourceNotSupported)
        );
        assert_eq!(MediaErrorCode::from_code(0), None);
    }
}
