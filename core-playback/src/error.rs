//! # Playback Error Types
//!
//! Errors returned by the playback controller's public API.
//!
//! Media failures (unsupported format, network failure, missing resource) are
//! *not* represented here: they reach observers as
//! [`MediaEventKind::Error`](bridge_traits::MediaEventKind::Error) events and
//! as `error: true` in the state snapshot. `PlaybackError` only covers caller
//! preconditions, configuration and catalog retrieval.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Direction of a relative track move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDirection {
    Previous,
    Next,
}

impl std::fmt::Display for TrackDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackDirection::Previous => f.write_str("previous"),
            TrackDirection::Next => f.write_str("next"),
        }
    }
}

/// Errors that can occur during playback operations.
#[derive(Error, Debug)]
pub enum PlaybackError {
    // ========================================================================
    // Caller Errors
    // ========================================================================
    /// `play_stream` was called without a URL.
    #[error("Stream URL cannot be empty")]
    EmptyUrl,

    /// Navigation was attempted before any track was loaded.
    #[error("Catalog is empty; load tracks before navigating")]
    EmptyCatalog,

    /// A track index outside the loaded catalog was requested.
    #[error("Track index {index} out of range (catalog has {len} tracks)")]
    TrackIndexOutOfRange { index: usize, len: usize },

    /// There is no track in the requested direction.
    #[error("No {0} track")]
    NoAdjacentTrack(TrackDirection),

    // ========================================================================
    // Host / Runtime Errors
    // ========================================================================
    /// The catalog provider failed to list tracks.
    #[error("Catalog error: {0}")]
    Catalog(#[from] BridgeError),

    /// Configuration or runtime failure.
    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),
}

impl PlaybackError {
    /// Returns `true` if the error comes from how the API was called rather
    /// than from the host.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PlaybackError::EmptyUrl
                | PlaybackError::EmptyCatalog
                | PlaybackError::TrackIndexOutOfRange { .. }
                | PlaybackError::NoAdjacentTrack(_)
        )
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
