//! Playback state snapshot.

use serde::{Deserialize, Serialize};

/// Immutable view of the player at one instant.
///
/// Produced exclusively by the [`StateTranslator`](crate::StateTranslator);
/// observers only ever see clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// `true` between a `playing` event and the next pause, end, error or stop.
    pub playing: bool,
    /// Position in seconds, `None` until the engine reports one.
    pub current_time: Option<f64>,
    /// Duration in seconds, `None` until the engine reports one.
    pub duration: Option<f64>,
    /// `current_time` rendered with the configured pattern, empty while unknown.
    pub readable_current_time: String,
    /// `duration` rendered with the configured pattern, empty while unknown.
    pub readable_duration: String,
    /// Enough data is buffered to start playback.
    pub can_play: bool,
    /// The last session ended with a media error.
    pub error: bool,
}

impl PlaybackState {
    /// The state of a controller with no session.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Idle shape with the error flag raised.
    pub fn failed() -> Self {
        Self {
            error: true,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::idle()
    }
}
