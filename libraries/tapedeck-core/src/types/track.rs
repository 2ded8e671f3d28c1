/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque locator for a track's audio resource
///
/// The player never interprets it; only the engine adapter does (a file path,
/// a URL, an asset key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRef(String);

impl SourceRef {
    /// Create a new source reference
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no locator was given
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Audio track descriptor
///
/// Immutable once loaded into a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Where the audio lives
    pub source: SourceRef,

    /// Cover art reference (falls back to the view's default cover)
    pub cover: Option<String>,
}

impl Track {
    /// Create a new track without cover art
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            source: SourceRef::new(source),
            cover: None,
        }
    }

    /// Attach cover art
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}
