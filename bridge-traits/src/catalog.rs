//! Catalog provider bridge.
//!
//! The catalog is owned by the host (cloud listing, bundled playlist, ...).
//! The core only reads entries and treats each `url` as an opaque playable
//! identifier handed to the media engine.

use crate::{error::Result, platform::PlatformSendSync};
use serde::{Deserialize, Serialize};

/// A playable track as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display title.
    pub name: String,
    /// Display artist.
    pub artist: String,
    /// Playable identifier passed to the media engine.
    pub url: String,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            url: url.into(),
        }
    }
}

/// Source of the track listing shown to the user.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait CatalogProvider: PlatformSendSync {
    /// Fetch the full list of entries.
    async fn get_files(&self) -> Result<Vec<CatalogEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_deserializes_from_listing_json() {
        let json = r#"{"name":"First Song","artist":"Jess","url":"https://cdn.example.com/1.mp3"}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry,
            CatalogEntry::new("First Song", "Jess", "https://cdn.example.com/1.mp3")
        );
    }
}
