//! Music catalog access.
//!
//! [`Catalog`] is the recommender's source of candidate tracks. The bundled
//! [`JsonCatalog`] serves tracks from a local JSON export, either a bare array
//! of tracks or an API-style `{"results": [...]}` envelope.

use crate::track::{Track, DEFAULT_MOOD};
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Source of mood-tagged candidate tracks.
pub trait Catalog {
    /// Up to `limit` tracks tagged with `mood`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream source is unavailable.
    fn tracks_by_mood(&self, mood: &str, limit: usize) -> Result<Vec<Track>>;
}

/// Keyword lists used to guess a mood from free-form tags, checked in order.
const TAG_MOODS: &[(&str, &[&str])] = &[
    ("happy", &["happy", "upbeat", "cheerful", "joyful", "positive", "uplifting"]),
    ("sad", &["sad", "melancholy", "depressing", "somber", "sorrowful", "melancholic"]),
    ("angry", &["angry", "aggressive", "intense", "rage", "furious", "hostile"]),
    ("calm", &["calm", "peaceful", "relaxing", "serene", "tranquil", "soothing"]),
    ("energetic", &["energetic", "dynamic", "powerful", "fast", "intense", "driving"]),
    ("neutral", &["neutral", "moderate", "balanced"]),
];

/// Guesses a mood from tags by substring match. Defaults to "neutral".
#[must_use]
pub fn infer_mood_from_tags<S: AsRef<str>>(tags: &[S]) -> &'static str {
    let lowered: Vec<String> = tags.iter().map(|t| t.as_ref().to_lowercase()).collect();

    TAG_MOODS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| lowered.iter().any(|tag| tag.contains(keyword)))
        })
        .map_or(DEFAULT_MOOD, |&(mood, _)| mood)
}

/// Ids some exports write as numbers.
const ID_KEYS: &[&str] = &["id", "trackId", "track_id"];

/// Turns one catalog record into a track.
///
/// Null fields fall back to their defaults and numeric ids become strings.
/// Returns `None` for records that still do not describe a track.
fn track_from_record(record: Value) -> Option<Track> {
    let Value::Object(mut fields) = record else {
        return None;
    };

    fields.retain(|_, value| !value.is_null());
    for key in ID_KEYS {
        if let Some(Value::Number(n)) = fields.get(*key) {
            let id = n.to_string();
            fields.insert((*key).to_string(), Value::String(id));
        }
    }

    let given_mood = fields
        .get("mood")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|mood| !mood.is_empty())
        .map(str::to_lowercase);

    let mut track: Track = match serde_json::from_value(Value::Object(fields)) {
        Ok(track) => track,
        Err(e) => {
            warn!("Skipping malformed catalog record: {e}");
            return None;
        }
    };
    track.mood = given_mood.unwrap_or_else(|| infer_mood_from_tags(track.tags.as_slice()).to_string());
    Some(track)
}

/// Catalog backed by an in-memory list of tracks.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    tracks: Vec<Track>,
}

impl JsonCatalog {
    /// Loads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a list of tracks.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
        let catalog = Self::from_json(&data)
            .with_context(|| format!("Invalid catalog file {}", path.display()))?;
        info!("Loaded {} catalog track(s) from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parses a catalog from JSON text. Mood labels are lowercased; records
    /// that cannot be read as tracks are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not a list of tracks.
    pub fn from_json(data: &str) -> Result<Self> {
        let records = match serde_json::from_str::<Value>(data).context("Catalog JSON did not parse")? {
            Value::Array(records) => records,
            Value::Object(mut envelope) => match envelope.remove("results") {
                Some(Value::Array(records)) => records,
                _ => bail!("Catalog object has no `results' list"),
            },
            _ => bail!("Catalog is neither a list of tracks nor a `results' envelope"),
        };

        let total = records.len();
        let tracks: Vec<Track> = records.into_iter().filter_map(track_from_record).collect();
        if tracks.len() < total {
            warn!("Skipped {} of {total} catalog record(s)", total - tracks.len());
        }

        Ok(Self::from_tracks(tracks))
    }

    #[must_use]
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Looks a track up by id.
    #[must_use]
    pub fn track_by_id(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.track_id() == Some(id))
    }

    /// Case-insensitive substring search over title, artist and album.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<Track> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.tracks
            .iter()
            .filter(|t| {
                [&t.title, &t.artist, &t.album]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .take(limit)
            .cloned()
            .collect()
    }

    fn matches_mood(track: &Track, mood: &str) -> bool {
        track.mood.eq_ignore_ascii_case(mood)
            || track.tags.iter().any(|tag| tag.to_lowercase().contains(mood))
    }
}

impl Catalog for JsonCatalog {
    fn tracks_by_mood(&self, mood: &str, limit: usize) -> Result<Vec<Track>> {
        let mood = mood.trim().to_lowercase();
        let tracks: Vec<Track> = self
            .tracks
            .iter()
            .filter(|t| Self::matches_mood(t, &mood))
            .take(limit)
            .map(|t| Track {
                mood: mood.clone(),
                ..t.clone()
            })
            .collect();

        debug!("Catalog returned {} track(s) for mood `{mood}'", tracks.len());
        Ok(tracks)
    }
}
