/// JSON catalog files
///
/// ```json
/// {
///   "media": [
///     { "id": "m1", "display_name": "Welcome", "source_url": "/media/welcome.png", "type": "image/png" }
///   ],
///   "playlists": {
///     "lobby": [ { "media_id": "m1", "order": 1 } ]
///   }
/// }
/// ```
///
/// The `type` tag is free text; the media kind is inferred from it and the
/// source URL.
use crate::error::{PlayerError, Result};
use marquee_core::{CatalogEntry, InMemoryCatalog, MediaKind, OrderingEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    media: Vec<MediaRecord>,

    #[serde(default)]
    playlists: BTreeMap<String, Vec<OrderingRecord>>,
}

#[derive(Debug, Deserialize)]
struct MediaRecord {
    id: String,
    #[serde(alias = "name")]
    display_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(alias = "url")]
    source_url: String,
    #[serde(rename = "type", default)]
    type_tag: String,
}

#[derive(Debug, Deserialize)]
struct OrderingRecord {
    media_id: String,
    order: i32,
}

/// Read a catalog file
pub async fn load(path: &Path) -> Result<InMemoryCatalog> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        PlayerError::CatalogFile(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse(&contents)
}

/// Parse catalog JSON
pub fn parse(json: &str) -> Result<InMemoryCatalog> {
    let file: CatalogFile = serde_json::from_str(json)?;
    let mut catalog = InMemoryCatalog::new();

    for record in file.media {
        if record.id.is_empty() {
            return Err(PlayerError::CatalogFile(
                "media record with an empty id".to_string(),
            ));
        }
        let kind = MediaKind::infer(&record.type_tag, &record.source_url);
        if kind == MediaKind::Unsupported {
            tracing::debug!(
                "Media {} has unsupported type {:?}",
                record.id,
                record.type_tag
            );
        }

        let mut entry = CatalogEntry::new(record.id, record.display_name, record.source_url, kind);
        if let Some(description) = record.description {
            entry = entry.with_description(description);
        }
        catalog.add_media(entry);
    }

    for (playlist_id, records) in file.playlists {
        let ordering = records
            .into_iter()
            .map(|r| OrderingEntry::new(r.media_id, r.order))
            .collect();
        catalog.add_playlist(playlist_id, ordering);
    }

    Ok(catalog)
}
