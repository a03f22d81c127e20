//! # State Translator
//!
//! Folds the media events of the active session into a single
//! [`PlaybackState`] and republishes it after every event.
//!
//! | Event | Effect |
//! |-------|--------|
//! | `canPlay` | capture duration, render `readable_duration`, `can_play = true` |
//! | `playing` | `playing = true` |
//! | `pause` | `playing = false` |
//! | `timeUpdate` | capture position, render `readable_current_time` |
//! | `error` | reset to idle, then `error = true` |
//! | anything else | no change |
//!
//! The snapshot is republished even when an event leaves it unchanged, so
//! observers see one snapshot per forwarded event.

use crate::event::MediaEvent;
use crate::state::PlaybackState;
use crate::time_format::{format_time, DEFAULT_TIME_FORMAT};
use bridge_traits::MediaEventKind;
use core_runtime::events::{SnapshotBus, Subscription, DEFAULT_SNAPSHOT_BUFFER_SIZE};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Owner of the controller's playback state.
pub struct StateTranslator {
    state: Mutex<PlaybackState>,
    bus: SnapshotBus<PlaybackState>,
    time_format: String,
}

impl StateTranslator {
    /// Creates a translator in the idle state.
    ///
    /// `capacity` bounds how many snapshots a subscriber may fall behind.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. [`PlayerConfig`](core_runtime::config::PlayerConfig)
    /// validation rejects that value before it gets here.
    pub fn new(time_format: impl Into<String>, capacity: usize) -> Self {
        Self {
            state: Mutex::new(PlaybackState::idle()),
            bus: SnapshotBus::new(PlaybackState::idle(), capacity),
            time_format: time_format.into(),
        }
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Applies `event` and publishes the resulting snapshot.
    pub fn apply(&self, event: &MediaEvent) -> PlaybackState {
        let mut state = self.state.lock();
        self.fold(&mut state, event);
        self.bus.publish(state.clone());
        state.clone()
    }

    /// Applies `event` unless `closed` has fired.
    ///
    /// The token is checked while the state lock is held, and teardown cancels
    /// it before resetting, so an event that loses the race can never land on
    /// top of the reset. A terminal event cancels `closed` itself before the
    /// lock is released, so nothing folds over its snapshot either.
    pub(crate) fn apply_unless_closed(
        &self,
        event: &MediaEvent,
        closed: &CancellationToken,
    ) -> bool {
        let mut state = self.state.lock();
        if closed.is_cancelled() {
            return false;
        }
        self.fold(&mut state, event);
        if event.is_terminal() {
            closed.cancel();
        }
        self.bus.publish(state.clone());
        true
    }

    /// Returns to the idle snapshot.
    ///
    /// Publishes only when something changed; returns whether it did.
    pub fn reset(&self) -> bool {
        let mut state = self.state.lock();
        if state.is_idle() {
            return false;
        }
        *state = PlaybackState::idle();
        self.bus.publish(state.clone());
        true
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> PlaybackState {
        self.state.lock().clone()
    }

    /// Subscribes to snapshots; the first one received is the current state.
    pub fn subscribe(&self) -> Subscription<PlaybackState> {
        self.bus.subscribe()
    }

    fn fold(&self, state: &mut PlaybackState, event: &MediaEvent) {
        match event.kind {
            MediaEventKind::CanPlay => {
                state.duration = event.duration;
                state.readable_duration = self.readable(event.duration);
                state.can_play = true;
            }
            MediaEventKind::Playing => state.playing = true,
            MediaEventKind::Pause => state.playing = false,
            MediaEventKind::TimeUpdate => {
                state.current_time = Some(event.current_time);
                state.readable_current_time = self.readable(Some(event.current_time));
            }
            // Position and duration are discarded along with everything else.
            MediaEventKind::Error => *state = PlaybackState::failed(),
            MediaEventKind::Ended
            | MediaEventKind::Play
            | MediaEventKind::LoadMetadata
            | MediaEventKind::LoadStart => {}
        }
    }

    fn readable(&self, seconds: Option<f64>) -> String {
        seconds
            .map(|value| format_time(value, &self.time_format))
            .unwrap_or_default()
    }
}

impl Default for StateTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT, DEFAULT_SNAPSHOT_BUFFER_SIZE)
    }
}

impl std::fmt::Debug for StateTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTranslator")
            .field("state", &*self.state.lock())
            .field("time_format", &self.time_format)
            .finish()
    }
}
