//! Track records as read from the liked-track store and the catalog.
//!
//! Every field carries a default, so a record with missing keys still
//! deserializes. Adapters hand the core fully-populated `Track`s; the core
//! never has to reject one.

use serde::{Deserialize, Serialize};

/// Label used when a track has no genre.
pub const UNKNOWN_GENRE: &str = "Unknown";
/// Label used when a track has no mood.
pub const DEFAULT_MOOD: &str = "neutral";
/// Label used when a track has no artist.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// A music track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Catalog identifier. Tracks without one can be ranked but never liked.
    #[serde(alias = "trackId", alias = "track_id")]
    pub id: Option<String>,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(alias = "artist_name")]
    pub artist: String,
    pub genre: String,
    pub mood: String,
    #[serde(alias = "album_name")]
    pub album: String,
    /// Length in seconds.
    pub duration: u32,
    pub tags: Vec<String>,
    pub album_image: String,
    #[serde(alias = "license_ccurl")]
    pub license: String,
    #[serde(alias = "audio")]
    pub audio_url: String,
    /// Unix seconds at which the track was liked. Only set on store reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_at: Option<i64>,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            id: None,
            title: "Unknown Title".to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            genre: UNKNOWN_GENRE.to_string(),
            mood: DEFAULT_MOOD.to_string(),
            album: "Unknown Album".to_string(),
            duration: 0,
            tags: Vec::new(),
            album_image: String::new(),
            license: String::new(),
            audio_url: String::new(),
            liked_at: None,
        }
    }
}

impl Track {
    /// Genre label, falling back to [`UNKNOWN_GENRE`] when blank.
    #[must_use]
    pub fn genre_label(&self) -> &str {
        non_blank_or(&self.genre, UNKNOWN_GENRE)
    }

    /// Mood label, falling back to [`DEFAULT_MOOD`] when blank.
    #[must_use]
    pub fn mood_label(&self) -> &str {
        non_blank_or(&self.mood, DEFAULT_MOOD)
    }

    /// Artist name, falling back to [`UNKNOWN_ARTIST`] when blank.
    #[must_use]
    pub fn artist_label(&self) -> &str {
        non_blank_or(&self.artist, UNKNOWN_ARTIST)
    }

    /// Identifier if present and non-empty.
    #[must_use]
    pub fn track_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let track: Track = serde_json::from_str(r#"{"id": "42", "title": "Song"}"#).unwrap();

        assert_eq!(track.id.as_deref(), Some("42"));
        assert_eq!(track.genre, UNKNOWN_GENRE);
        assert_eq!(track.mood, DEFAULT_MOOD);
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.duration, 0);
    }

    #[test]
    fn test_store_and_catalog_aliases() {
        let stored: Track =
            serde_json::from_str(r#"{"trackId": "7", "artist": "A", "genre": "rock"}"#).unwrap();
        assert_eq!(stored.track_id(), Some("7"));

        let catalog: Track = serde_json::from_str(
            r#"{"id": "8", "name": "Title", "artist_name": "B", "album_name": "C", "audio": "http://x"}"#,
        )
        .unwrap();
        assert_eq!(catalog.title, "Title");
        assert_eq!(catalog.artist, "B");
        assert_eq!(catalog.album, "C");
        assert_eq!(catalog.audio_url, "http://x");
    }

    #[test]
    fn test_blank_labels_fall_back() {
        let track = Track {
            genre: "  ".to_string(),
            mood: String::new(),
            artist: String::new(),
            id: Some(String::new()),
            ..Track::default()
        };

        assert_eq!(track.genre_label(), UNKNOWN_GENRE);
        assert_eq!(track.mood_label(), DEFAULT_MOOD);
        assert_eq!(track.artist_label(), UNKNOWN_ARTIST);
        assert_eq!(track.track_id(), None);
    }
}
