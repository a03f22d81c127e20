//! WebAssembly Bridge Implementations
//!
//! Browser implementations of the traits defined in `bridge-traits`, built on
//! `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - `HtmlAudioEngine`: `MediaEngine` over an `HTMLAudioElement`
//! - `FetchCatalogProvider`: `CatalogProvider` over `fetch`
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::HtmlAudioEngine;
//! use core_playback::AudioController;
//! use std::sync::Arc;
//!
//! let controller = AudioController::new(Arc::new(HtmlAudioEngine::new()?));
//! let events = controller.play_stream("assets/first.mp3")?;
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod audio;
pub mod catalog;
pub mod error;

// Re-export commonly used types
pub use audio::{dom_event_name, HtmlAudioEngine};
pub use catalog::FetchCatalogProvider;
pub use error::{WasmError, WasmResult};
