//! # Player Configuration Module
//!
//! Provides configuration management for the playback controller.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`PlayerConfig`] holding the host bridges and settings the controller
//! needs. Validation is fail-fast: a missing media engine or a nonsensical
//! setting is reported at build time with an actionable message, never at
//! first playback.
//!
//! ## Required Dependencies
//!
//! - `MediaEngine` - The audio resource the controller drives
//!
//! ## Optional Dependencies
//!
//! - `CatalogProvider` - Track listing used by navigation
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::PlayerConfig;
//! use std::sync::Arc;
//!
//! let config = PlayerConfig::builder()
//!     .media_engine(Arc::new(HtmlAudioEngine::new()?))
//!     .time_format("mm:ss")
//!     .state_buffer_size(128)
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::PlayerConfig;
//!
//! // Panics: no media engine was provided
//! let config = PlayerConfig::builder()
//!     .time_format("HH:mm:ss")
//!     .build()
//!     .expect("Should fail - missing media engine");
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_SNAPSHOT_BUFFER_SIZE;
use bridge_traits::{CatalogProvider, MediaEngine};
use std::sync::Arc;

/// Display pattern used for readable time fields unless overridden.
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";

/// Upper bound for [`PlayerConfig::state_buffer_size`].
pub const MAX_STATE_BUFFER_SIZE: usize = 10_000;

/// Configuration for the playback controller.
///
/// Use [`PlayerConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct PlayerConfig {
    /// Media engine driven by the playback session (required)
    pub media_engine: Arc<dyn MediaEngine>,

    /// Catalog used for track navigation (optional)
    pub catalog_provider: Option<Arc<dyn CatalogProvider>>,

    /// Pattern for `readableCurrentTime` / `readableDuration`
    pub time_format: String,

    /// Snapshots buffered per state subscriber before it starts lagging
    pub state_buffer_size: usize,
}

impl std::fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("media_engine", &"MediaEngine { ... }")
            .field(
                "catalog_provider",
                &self
                    .catalog_provider
                    .as_ref()
                    .map(|_| "CatalogProvider { ... }"),
            )
            .field("time_format", &self.time_format)
            .field("state_buffer_size", &self.state_buffer_size)
            .finish()
    }
}

impl PlayerConfig {
    /// Creates a new builder for constructing a `PlayerConfig`.
    pub fn builder() -> PlayerConfigBuilder {
        PlayerConfigBuilder::default()
    }

    /// Shorthand for a config with defaults around `engine`.
    pub fn with_engine(engine: Arc<dyn MediaEngine>) -> Self {
        Self {
            media_engine: engine,
            catalog_provider: None,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            state_buffer_size: DEFAULT_SNAPSHOT_BUFFER_SIZE,
        }
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Time format is not blank
    /// - State buffer size is within `1..=MAX_STATE_BUFFER_SIZE`
    pub fn validate(&self) -> Result<()> {
        if self.time_format.trim().is_empty() {
            return Err(Error::Config(
                "Time format cannot be empty. Use a pattern such as \"HH:mm:ss\" or \"mm:ss\"."
                    .to_string(),
            ));
        }

        if self.state_buffer_size == 0 {
            return Err(Error::Config(
                "State buffer size must be greater than 0".to_string(),
            ));
        }

        if self.state_buffer_size > MAX_STATE_BUFFER_SIZE {
            return Err(Error::Config(format!(
                "State buffer size exceeds maximum of {}",
                MAX_STATE_BUFFER_SIZE
            )));
        }

        Ok(())
    }
}

fn media_engine_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "MediaEngine".to_string(),
        message: "A MediaEngine implementation is required to drive playback. \
                 Web: use bridge_wasm::HtmlAudioEngine. \
                 Native: inject the host's player behind the MediaEngine trait."
            .to_string(),
    }
}

/// Builder for constructing [`PlayerConfig`] instances.
#[derive(Default)]
pub struct PlayerConfigBuilder {
    media_engine: Option<Arc<dyn MediaEngine>>,
    catalog_provider: Option<Arc<dyn CatalogProvider>>,
    time_format: Option<String>,
    state_buffer_size: Option<usize>,
}

impl PlayerConfigBuilder {
    /// Sets the media engine implementation (required).
    pub fn media_engine(mut self, engine: Arc<dyn MediaEngine>) -> Self {
        self.media_engine = Some(engine);
        self
    }

    /// Sets the catalog provider (optional).
    pub fn catalog_provider(mut self, provider: Arc<dyn CatalogProvider>) -> Self {
        self.catalog_provider = Some(provider);
        self
    }

    /// Sets the display pattern for readable time fields.
    ///
    /// Default: `"HH:mm:ss"`
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::PlayerConfig;
    ///
    /// let builder = PlayerConfig::builder().time_format("mm:ss");
    /// ```
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = Some(pattern.into());
        self
    }

    /// Sets how many snapshots each state subscriber may fall behind.
    ///
    /// Default: 64
    pub fn state_buffer_size(mut self, size: usize) -> Self {
        self.state_buffer_size = Some(size);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when no media engine was provided
    /// - [`Error::Config`] when a setting is out of range
    pub fn build(self) -> Result<PlayerConfig> {
        let media_engine = self.media_engine.ok_or_else(media_engine_missing_error)?;

        let config = PlayerConfig {
            media_engine,
            catalog_provider: self.catalog_provider,
            time_format: self
                .time_format
                .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
            state_buffer_size: self
                .state_buffer_size
                .unwrap_or(DEFAULT_SNAPSHOT_BUFFER_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}
