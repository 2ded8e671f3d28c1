//! Track catalog
//!
//! The catalog is built once at startup and never changes afterwards.
//! Everything downstream refers to tracks by their index in it.

use crate::error::{CoreError, Result};
use crate::types::{SourceRef, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw catalog record as it appears in configuration or JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable integer id
    pub id: u32,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Source locator
    #[serde(alias = "source")]
    pub src: String,

    /// Optional cover art reference
    #[serde(default)]
    pub cover: Option<String>,
}

impl From<CatalogEntry> for Track {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: TrackId::new(entry.id),
            title: entry.title,
            artist: entry.artist,
            source: SourceRef::new(entry.src),
            cover: entry.cover,
        }
    }
}

/// Immutable ordered list of tracks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and untitled tracks
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());

        for track in &tracks {
            if !seen.insert(track.id) {
                return Err(CoreError::DuplicateTrackId(track.id));
            }
            if track.title.trim().is_empty() {
                return Err(CoreError::invalid_input(format!(
                    "track {} has an empty title",
                    track.id
                )));
            }
        }

        Ok(Self { tracks })
    }

    /// Build a catalog from raw entries
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self> {
        Self::new(entries.into_iter().map(Track::from).collect())
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when the catalog holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate tracks in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, title: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
            artist: "Kai Angel".to_string(),
            src: format!("Music/Kai Angel - {}.mp3", title),
            cover: None,
        }
    }

    #[test]
    fn preserves_order() {
        let catalog =
            Catalog::from_entries(vec![entry(1, "are you happy"), entry(2, "basement")]).unwrap();

        let titles: Vec<&str> = catalog.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["are you happy", "basement"]);
        assert_eq!(catalog.get(1).map(|t| t.id), Some(TrackId::new(2)));
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::from_entries(vec![entry(7, "444"), entry(7, "drive")]).unwrap_err();
        assert_eq!(err, CoreError::DuplicateTrackId(TrackId::new(7)));
    }

    #[test]
    fn rejects_blank_titles() {
        let err = Catalog::from_entries(vec![entry(1, "   ")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn entry_accepts_source_alias() {
        let json = r#"{"id": 4, "title": "amy", "artist": "Kai Angel", "source": "amy.mp3"}"#;
        let parsed: CatalogEntry = serde_json::from_str(json).unwrap();
        let track = Track::from(parsed);

        assert_eq!(track.source.as_str(), "amy.mp3");
        assert!(track.cover.is_none());
    }
}
