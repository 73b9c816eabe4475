//! Playlist resolution
//!
//! Joins catalog metadata with a playlist's ordering list.

use marquee_core::{Catalog, CatalogEntry, MediaId, OrderingEntry, PlayableItem, PlaylistId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{PlaybackError, Result};

/// Resolves playlist identifiers into ordered playable items
#[derive(Clone)]
pub struct PlaylistResolver {
    catalog: Arc<dyn Catalog>,
}

impl PlaylistResolver {
    /// Create a resolver over a catalog collaborator
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Load the ordered items of a playlist
    ///
    /// # Errors
    /// `NotFound` if the playlist identifier does not resolve, `Catalog` if
    /// the collaborator fails. An empty playlist is not an error.
    pub async fn load(&self, playlist_id: &PlaylistId) -> Result<Vec<PlayableItem>> {
        let ordering = self
            .catalog
            .playlist_items(playlist_id)
            .await?
            .ok_or_else(|| PlaybackError::NotFound(playlist_id.clone()))?;

        let media = self.catalog.media().await?;
        let items = tolerant_join(media, ordering);

        debug!("Resolved playlist {} to {} items", playlist_id, items.len());
        Ok(items)
    }
}

impl std::fmt::Debug for PlaylistResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistResolver").finish_non_exhaustive()
    }
}

/// Join catalog entries with an ordering list
///
/// Ordering entries whose media id is not in the catalog are dropped.
/// The result is sorted by `order` ascending; ties keep ordering-list
/// position.
pub fn tolerant_join(media: Vec<CatalogEntry>, ordering: Vec<OrderingEntry>) -> Vec<PlayableItem> {
    let by_id: HashMap<MediaId, CatalogEntry> = media
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();

    let mut joined: Vec<(i32, PlayableItem)> = ordering
        .into_iter()
        .filter_map(|entry| match by_id.get(&entry.media_id) {
            Some(media) => Some((entry.order, PlayableItem::from(media.clone()))),
            None => {
                debug!("Dropping playlist entry for unknown media {}", entry.media_id);
                None
            }
        })
        .collect();

    joined.sort_by_key(|(order, _)| *order);
    joined.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{InMemoryCatalog, MediaKind};

    fn entry(id: &str, kind: MediaKind) -> CatalogEntry {
        CatalogEntry::new(id, id.to_uppercase(), format!("/media/{id}"), kind)
    }

    fn ids(items: &[PlayableItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn join_orders_by_position_field() {
        let media = vec![
            entry("a", MediaKind::Image),
            entry("b", MediaKind::Video),
            entry("c", MediaKind::Audio),
        ];
        let ordering = vec![
            OrderingEntry::new("c", 3),
            OrderingEntry::new("a", 1),
            OrderingEntry::new("b", 2),
        ];

        assert_eq!(ids(&tolerant_join(media, ordering)), vec!["a", "b", "c"]);
    }

    #[test]
    fn join_drops_unknown_media() {
        let media = vec![entry("a", MediaKind::Image)];
        let ordering = vec![OrderingEntry::new("ghost", 0), OrderingEntry::new("a", 1)];

        let items = tolerant_join(media, ordering);
        assert_eq!(ids(&items), vec!["a"]);
        assert_eq!(items[0].display_name, "A");
    }

    #[test]
    fn join_keeps_list_position_on_ties() {
        let media = vec![entry("a", MediaKind::Image), entry("b", MediaKind::Image)];
        let ordering = vec![OrderingEntry::new("b", 0), OrderingEntry::new("a", 0)];

        assert_eq!(ids(&tolerant_join(media, ordering)), vec!["b", "a"]);
    }

    #[test]
    fn join_allows_repeated_media() {
        let media = vec![entry("a", MediaKind::Image)];
        let ordering = vec![OrderingEntry::new("a", 1), OrderingEntry::new("a", 2)];

        assert_eq!(tolerant_join(media, ordering).len(), 2);
    }

    #[tokio::test]
    async fn load_unknown_playlist_is_not_found() {
        let resolver = PlaylistResolver::new(Arc::new(InMemoryCatalog::new()));
        let err = resolver.load(&PlaylistId::new("missing")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::NotFound(id) if id.as_str() == "missing"));
    }

    #[tokio::test]
    async fn load_empty_playlist_is_ok() {
        let catalog = InMemoryCatalog::new().with_playlist("empty", vec![]);
        let resolver = PlaylistResolver::new(Arc::new(catalog));
        let items = resolver.load(&PlaylistId::new("empty")).await.unwrap();
        assert!(items.is_empty());
    }
}
