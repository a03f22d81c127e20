//! # Host Bridge Traits
//!
//! Contracts between the playback core and the host platform.
//!
//! ## Overview
//!
//! The core owns session lifecycle and state translation, but never touches
//! audio hardware, the network, or the DOM directly. Everything it needs from
//! the outside world is expressed here as a trait the host implements.
//!
//! ## Traits
//!
//! - [`MediaEngine`](media::MediaEngine) - The single audio resource: source,
//!   transport controls, position/duration readings, lifecycle listeners
//! - [`CatalogProvider`](catalog::CatalogProvider) - Track listing consumed by
//!   navigation
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Implementations
//!
//! | Platform | Implementation Crate | Provides |
//! |----------|---------------------|----------|
//! | Web      | `bridge-wasm`       | `HtmlAudioEngine` |
//! | Desktop  | `bridge-desktop`    | `HttpCatalogProvider`, `StaticCatalogProvider` |
//!
//! ## Thread Safety
//!
//! On native targets every bridge trait requires `Send + Sync` (via
//! [`PlatformSendSync`](platform::PlatformSendSync)). On `wasm32` the bound
//! is lifted because browser handles are single-threaded.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::catalog::{CatalogEntry, CatalogProvider};
//! use bridge_traits::error::Result;
//!
//! struct BundledCatalog;
//!
//! #[async_trait::async_trait]
//! impl CatalogProvider for BundledCatalog {
//!     async fn get_files(&self) -> Result<Vec<CatalogEntry>> {
//!         Ok(vec![CatalogEntry::new("First Song", "Jess", "assets/first.mp3")])
//!     }
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod logging;
pub mod media;
pub mod platform;

pub use error::BridgeError;

// Re-export commonly used types
pub use catalog::{CatalogEntry, CatalogProvider};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use media::{
    ListenerId, MediaEngine, MediaErrorCode, MediaEventHandler, MediaEventKind,
};
pub use platform::PlatformSendSync;
