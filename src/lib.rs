//! Workspace facade crate.
//!
//! Re-exports the playback controller and its host contracts so that host
//! applications can depend on `stream-player-workspace` alone and pick their
//! platform adapters through feature flags (`desktop-shims`, `wasm`).

pub use bridge_traits::{
    CatalogEntry, CatalogProvider, ListenerId, MediaEngine, MediaErrorCode, MediaEventHandler,
    MediaEventKind,
};
pub use core_playback::{
    format_time, AudioController, MediaEvent, PlaybackError, PlaybackState, PlaybackStream,
    SessionId, StateTranslator, TrackNavigator, DEFAULT_TIME_FORMAT,
};
pub use core_runtime::config::PlayerConfig;
pub use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop::{HttpCatalogProvider, StaticCatalogProvider};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm::{FetchCatalogProvider, HtmlAudioEngine};
