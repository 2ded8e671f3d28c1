//! Lyrics lookup
//!
//! Lyrics are keyed by exact track title. Titles without an entry get a
//! placeholder naming the track, so the lyrics panel always has text.

use std::collections::HashMap;

/// Capability to fetch lyrics for a title
pub trait LyricsLookup {
    /// Lyrics for `title`, or a placeholder when none are known
    fn lookup_lyrics(&self, title: &str) -> String;
}

/// Placeholder shown for titles without lyrics
pub fn placeholder(title: &str) -> String {
    format!("Lyrics for \"{title}\"\n\nLyrics are not available yet.")
}

/// In-memory title → lyrics mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsBook {
    entries: HashMap<String, String>,
}

impl LyricsBook {
    /// Empty book; every lookup yields the placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored lyrics for exactly `title`
    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries.get(title).map(String::as_str)
    }

    /// Number of titles with lyrics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no lyrics are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LyricsBook
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(title, text)| (title.into(), text.into()))
                .collect(),
        }
    }
}

impl LyricsLookup for LyricsBook {
    fn lookup_lyrics(&self, title: &str) -> String {
        self.get(title)
            .map_or_else(|| placeholder(title), str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_title_match() {
        let book: LyricsBook = [("mirrors", "Mirrors on the wall")].into_iter().collect();

        assert_eq!(book.lookup_lyrics("mirrors"), "Mirrors on the wall");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let book: LyricsBook = [("amy", "Amy, with your golden hair")].into_iter().collect();

        assert_eq!(book.lookup_lyrics("Amy"), placeholder("Amy"));
    }

    #[test]
    fn placeholder_names_the_title() {
        let book = LyricsBook::new();
        let text = book.lookup_lyrics("444");

        assert!(book.is_empty());
        assert!(text.contains("\"444\""));
        assert!(text.contains("not available"));
    }
}
