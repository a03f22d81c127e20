//! # Desktop Bridge Implementations
//!
//! Catalog providers for native hosts (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpCatalogProvider` fetches the track listing as JSON using `reqwest`
//! - `StaticCatalogProvider` serves a fixed, in-memory listing
//!
//! Native hosts inject their own audio player behind
//! [`MediaEngine`](bridge_traits::MediaEngine); browsers use `bridge-wasm`.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::HttpCatalogProvider;
//! use core_runtime::config::PlayerConfig;
//! use std::sync::Arc;
//!
//! let catalog = HttpCatalogProvider::new("https://cdn.example/files.json")?;
//! let config = PlayerConfig::builder()
//!     .media_engine(engine)
//!     .catalog_provider(Arc::new(catalog))
//!     .build()?;
//! ```

mod catalog;

pub use catalog::{HttpCatalogProvider, StaticCatalogProvider};
