//! In-memory catalog
//!
//! Holds catalog entries and playlist ordering lists in memory. Used by tests,
//! by hosts that load a catalog snapshot from disk, and for embedding.

use crate::error::Result;
use crate::traits::Catalog;
use crate::types::{CatalogEntry, OrderingEntry, PlaylistId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Catalog backed by plain collections
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    media: Vec<CatalogEntry>,
    playlists: HashMap<PlaylistId, Vec<OrderingEntry>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog entry
    pub fn add_media(&mut self, entry: CatalogEntry) {
        self.media.push(entry);
    }

    /// Register a playlist with its ordering list (replaces an existing one)
    pub fn add_playlist(&mut self, id: impl Into<PlaylistId>, items: Vec<OrderingEntry>) {
        self.playlists.insert(id.into(), items);
    }

    /// Builder-style [`InMemoryCatalog::add_media`]
    #[must_use]
    pub fn with_media(mut self, entry: CatalogEntry) -> Self {
        self.add_media(entry);
        self
    }

    /// Builder-style [`InMemoryCatalog::add_playlist`]
    #[must_use]
    pub fn with_playlist(mut self, id: impl Into<PlaylistId>, items: Vec<OrderingEntry>) -> Self {
        self.add_playlist(id, items);
        self
    }

    /// Number of catalog entries
    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Number of playlists
    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn media(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.media.clone())
    }

    async fn playlist_items(&self, id: &PlaylistId) -> Result<Option<Vec<OrderingEntry>>> {
        Ok(self.playlists.get(id).cloned())
    }
}
