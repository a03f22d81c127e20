//! # Playback Core
//!
//! Single-track audio playback controller.
//!
//! ## Overview
//!
//! This crate handles:
//! - Opening a playback session per stream URL and tearing it down exactly
//!   once on stop, supersession, drop, end or error
//! - Translating the engine's lifecycle events into a [`PlaybackState`]
//!   snapshot published on a current-value channel
//! - Rendering positions as clock strings ([`format_time`])
//! - Stepping through a track catalog ([`TrackNavigator`])
//!
//! The audio itself is produced by a host [`MediaEngine`](bridge_traits::MediaEngine);
//! see `bridge-wasm` for the browser implementation.

pub mod controller;
pub mod error;
pub mod event;
pub mod navigator;
pub mod session;
pub mod state;
pub mod stream;
pub mod time_format;
pub mod translator;

pub use controller::AudioController;
pub use error::{PlaybackError, Result, TrackDirection};
pub use event::{MediaEvent, SessionId};
pub use navigator::TrackNavigator;
pub use session::{PlaybackSession, TeardownReason};
pub use state::PlaybackState;
pub use stream::PlaybackStream;
pub use time_format::{format_time, DEFAULT_TIME_FORMAT, INVALID_TIME};
pub use translator::StateTranslator;
