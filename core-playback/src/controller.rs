//! # Audio Controller
//!
//! Public face of the playback core: opens streams, forwards transport
//! controls to the active session and exposes the translated state.
//!
//! ```ignore
//! use core_playback::AudioController;
//! use futures::StreamExt;
//!
//! let controller = AudioController::new(engine);
//! let mut state = controller.get_state();
//!
//! let mut events = controller.play_stream("https://cdn.example/song.mp3")?;
//! while let Some(event) = events.next().await {
//!     println!("{} at {}", event.kind, controller.format_time(event.current_time));
//! }
//! ```

use crate::error::{PlaybackError, Result};
use crate::event::SessionId;
use crate::session::PlaybackSession;
use crate::state::PlaybackState;
use crate::stream::PlaybackStream;
use crate::time_format::format_time;
use crate::translator::StateTranslator;
use bridge_traits::{CatalogProvider, MediaEngine, MediaErrorCode};
use core_runtime::config::PlayerConfig;
use core_runtime::events::Subscription;
use std::sync::Arc;
use tracing::debug;

/// Single-track playback controller.
pub struct AudioController {
    session: Arc<PlaybackSession>,
    translator: Arc<StateTranslator>,
    catalog_provider: Option<Arc<dyn CatalogProvider>>,
}

impl AudioController {
    /// Controller over `engine` with default settings.
    pub fn new(engine: Arc<dyn MediaEngine>) -> Self {
        Self::assemble(PlayerConfig::with_engine(engine))
    }

    /// Controller built from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Runtime`] if `config` fails validation.
    pub fn from_config(config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: PlayerConfig) -> Self {
        let translator = Arc::new(StateTranslator::new(
            config.time_format,
            config.state_buffer_size,
        ));
        let session = Arc::new(PlaybackSession::new(
            config.media_engine,
            Arc::clone(&translator),
        ));
        Self {
            session,
            translator,
            catalog_provider: config.catalog_provider,
        }
    }

    /// Returns a lazy stream that plays `url` once polled.
    ///
    /// Opening it releases whatever session was active. An unplayable URL is
    /// not an `Err` here; it shows up as an `error` event on the stream.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::EmptyUrl`] if `url` is blank.
    pub fn play_stream(&self, url: impl Into<String>) -> Result<PlaybackStream> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(PlaybackError::EmptyUrl);
        }
        debug!(url = %core_runtime::logging::redact_url(&url), "Stream requested");
        Ok(PlaybackStream::new(Arc::clone(&self.session), url))
    }

    pub fn play(&self) {
        self.session.play();
    }

    pub fn pause(&self) {
        self.session.pause();
    }

    /// Cancels the active session. Safe to call repeatedly or with none.
    pub fn stop(&self) {
        self.session.stop();
    }

    pub fn seek_to(&self, seconds: f64) {
        self.session.seek_to(seconds);
    }

    /// Subscribes to state snapshots, starting with the current one.
    pub fn get_state(&self) -> Subscription<PlaybackState> {
        self.translator.subscribe()
    }

    pub fn current_state(&self) -> PlaybackState {
        self.translator.snapshot()
    }

    /// Formats `seconds` with the configured pattern.
    pub fn format_time(&self, seconds: f64) -> String {
        format_time(seconds, self.translator.time_format())
    }

    /// Formats `seconds` with an explicit pattern.
    pub fn format_time_with(&self, seconds: f64, pattern: &str) -> String {
        format_time(seconds, pattern)
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.session.active_session()
    }

    pub fn last_media_error(&self) -> Option<MediaErrorCode> {
        self.session.last_media_error()
    }

    /// Catalog configured through [`PlayerConfig`], if any.
    pub fn catalog_provider(&self) -> Option<&Arc<dyn CatalogProvider>> {
        self.catalog_provider.as_ref()
    }
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("session", &self.session)
            .field("translator", &self.translator)
            .field("has_catalog", &self.catalog_provider.is_some())
            .finish()
    }
}
