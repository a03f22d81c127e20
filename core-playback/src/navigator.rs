//! # Track Navigation
//!
//! Steps through a catalog of tracks on top of an [`AudioController`]. Every
//! move stops the current session and hands back a fresh [`PlaybackStream`]
//! for the selected entry; the caller drives it like any other stream.

use crate::controller::AudioController;
use crate::error::{PlaybackError, Result, TrackDirection};
use crate::stream::PlaybackStream;
use bridge_traits::{CatalogEntry, CatalogProvider};
use core_runtime::Error as RuntimeError;
use std::sync::Arc;
use tracing::{info, warn};

/// Catalog cursor driving an [`AudioController`].
#[derive(Debug)]
pub struct TrackNavigator {
    controller: Arc<AudioController>,
    files: Vec<CatalogEntry>,
    current: Option<usize>,
}

impl TrackNavigator {
    pub fn new(controller: Arc<AudioController>) -> Self {
        Self {
            controller,
            files: Vec::new(),
            current: None,
        }
    }

    /// Navigator over an already known list of tracks.
    pub fn with_files(controller: Arc<AudioController>, files: Vec<CatalogEntry>) -> Self {
        Self {
            controller,
            files,
            current: None,
        }
    }

    /// Replaces the track list with the one `provider` returns.
    ///
    /// Returns the number of tracks loaded. The selection is cleared.
    pub async fn load(&mut self, provider: &dyn CatalogProvider) -> Result<usize> {
        let files = provider.get_files().await?;
        if files.is_empty() {
            warn!("Catalog returned no tracks");
        } else {
            info!(tracks = files.len(), "Catalog loaded");
        }
        self.files = files;
        self.current = None;
        Ok(self.files.len())
    }

    /// Reloads from the catalog configured on the controller.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::Runtime`] wrapping `CapabilityMissing` when the
    /// controller was built without a catalog provider.
    pub async fn refresh(&mut self) -> Result<usize> {
        let provider = self.controller.catalog_provider().cloned().ok_or_else(|| {
            RuntimeError::CapabilityMissing {
                capability: "CatalogProvider".to_string(),
                message: "Configure one with PlayerConfig::builder().catalog_provider(..) \
                          or call TrackNavigator::load with a provider."
                    .to_string(),
            }
        })?;
        self.load(provider.as_ref()).await
    }

    /// Stops the current track and returns a stream for track `index`.
    pub fn open_file(&mut self, index: usize) -> Result<PlaybackStream> {
        if self.files.is_empty() {
            return Err(PlaybackError::EmptyCatalog);
        }
        let entry = self
            .files
            .get(index)
            .ok_or(PlaybackError::TrackIndexOutOfRange {
                index,
                len: self.files.len(),
            })?;

        let stream = self.controller.play_stream(entry.url.clone())?;
        info!(index, name = %entry.name, artist = %entry.artist, "Opening track");
        self.current = Some(index);
        self.controller.stop();
        Ok(stream)
    }

    /// Opens the track after the current one, or the first if none is
    /// selected.
    ///
    /// A fresh navigator has no selection, so the first `next()` plays track
    /// 0 and [`is_first_playing`](Self::is_first_playing) stays `false` until
    /// then. Use [`open_file`](Self::open_file) to start elsewhere.
    pub fn next(&mut self) -> Result<PlaybackStream> {
        if self.files.is_empty() {
            return Err(PlaybackError::EmptyCatalog);
        }
        let index = match self.current {
            None => 0,
            Some(current) if current + 1 < self.files.len() => current + 1,
            Some(_) => return Err(PlaybackError::NoAdjacentTrack(TrackDirection::Next)),
        };
        self.open_file(index)
    }

    /// Opens the track before the current one.
    pub fn previous(&mut self) -> Result<PlaybackStream> {
        if self.files.is_empty() {
            return Err(PlaybackError::EmptyCatalog);
        }
        let index = self
            .current
            .and_then(|current| current.checked_sub(1))
            .ok_or(PlaybackError::NoAdjacentTrack(TrackDirection::Previous))?;
        self.open_file(index)
    }

    pub fn is_first_playing(&self) -> bool {
        self.current == Some(0)
    }

    pub fn is_last_playing(&self) -> bool {
        matches!(self.current, Some(index) if index + 1 == self.files.len())
    }

    /// The selected entry.
    pub fn current(&self) -> Option<&CatalogEntry> {
        self.current.and_then(|index| self.files.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn files(&self) -> &[CatalogEntry] {
        &self.files
    }

    pub fn controller(&self) -> &Arc<AudioController> {
        &self.controller
    }

    pub fn play(&self) {
        self.controller.play();
    }

    pub fn pause(&self) {
        self.controller.pause();
    }

    pub fn stop(&self) {
        self.controller.stop();
    }

    /// Slider change: move the position of the current track.
    pub fn seek_to(&self, seconds: f64) {
        self.controller.seek_to(seconds);
    }
}
