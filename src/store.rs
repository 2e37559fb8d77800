//! Liked-track storage.
//!
//! [`TrackStore`] is the read-only view the recommender needs. The SQLite
//! adapter additionally offers the write operations the CLI uses to record
//! likes; the ranking path never calls them.

use crate::cli::SortOrder;
use crate::insights::frequency;
use crate::track::Track;
use anyhow::{Context, Result};
use log::{debug, trace};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Read access to users' liked tracks.
pub trait TrackStore {
    /// Tracks liked by `user_id`, restricted to `mood` when given.
    /// Mood labels compare case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn liked_tracks(&self, user_id: &str, mood: Option<&str>) -> Result<Vec<Track>>;

    /// Identifiers of every track liked by `user_id`, across all moods.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn liked_track_ids(&self, user_id: &str) -> Result<HashSet<String>>;
}

/// Totals over a user's liked tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total_tracks: usize,
    pub total_duration_minutes: u64,
    pub mood_distribution: Vec<(String, usize)>,
    pub genre_distribution: Vec<(String, usize)>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS liked_tracks (
    id       INTEGER PRIMARY KEY,
    user_id  TEXT    NOT NULL,
    track_id TEXT    NOT NULL,
    title    TEXT    NOT NULL,
    artist   TEXT    NOT NULL,
    genre    TEXT    NOT NULL,
    mood     TEXT    NOT NULL,
    album    TEXT    NOT NULL,
    duration INTEGER NOT NULL DEFAULT 0,
    liked_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
    UNIQUE(user_id, track_id)
);
CREATE INDEX IF NOT EXISTS idx_liked_tracks_user_mood ON liked_tracks(user_id, mood);";

const SELECT_COLUMNS: &str =
    "SELECT track_id, title, artist, genre, mood, album, duration, liked_at FROM liked_tracks";

/// SQLite-backed [`TrackStore`].
pub struct SqliteTrackStore {
    conn: Connection,
}

impl SqliteTrackStore {
    /// Opens (creating if needed) the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be created.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open liked-track database at {}", db_path.display()))?;
        debug!("Opened liked-track database at {}", db_path.display());
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Invalid SQL when creating liked_tracks table")?;
        Ok(Self { conn })
    }

    /// Records that `user_id` likes `track`. The mood label is stored lowercased.
    ///
    /// Returns `false` when the track has no id or is already liked.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_liked_track(&self, user_id: &str, track: &Track) -> Result<bool> {
        let Some(track_id) = track.track_id() else {
            debug!("Not storing like for `{}': track has no id", track.title);
            return Ok(false);
        };

        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO liked_tracks
                    (user_id, track_id, title, artist, genre, mood, album, duration)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    user_id,
                    track_id,
                    track.title,
                    track.artist_label(),
                    track.genre_label(),
                    track.mood_label().to_lowercase(),
                    track.album,
                    track.duration,
                ],
            )
            .with_context(|| format!("Failed to INSERT liked track {track_id} for {user_id}"))?;

        trace!("add_liked_track({user_id}, {track_id}) -> {inserted} row(s)");
        Ok(inserted > 0)
    }

    /// Removes a like. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove_liked_track(&self, user_id: &str, track_id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM liked_tracks WHERE user_id = ?1 AND track_id = ?2",
                params![user_id, track_id],
            )
            .with_context(|| format!("Failed to DELETE liked track {track_id} for {user_id}"))?;
        Ok(removed > 0)
    }

    /// Whether `user_id` has liked `track_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_liked(&self, user_id: &str, track_id: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM liked_tracks WHERE user_id = ?1 AND track_id = ?2",
                params![user_id, track_id],
                |_| Ok(()),
            )
            .optional()
            .context("Failed to query liked track")?;
        Ok(found.is_some())
    }

    /// Totals over everything `user_id` has liked. `None` for a user with no likes.
    ///
    /// # Errors
    ///
    /// Returns an error if the liked tracks cannot be read.
    pub fn user_stats(&self, user_id: &str) -> Result<Option<UserStats>> {
        let tracks = self.liked_tracks(user_id, None)?;
        if tracks.is_empty() {
            return Ok(None);
        }

        let total_seconds: u64 = tracks.iter().map(|t| u64::from(t.duration)).sum();
        Ok(Some(UserStats {
            total_tracks: tracks.len(),
            total_duration_minutes: total_seconds / 60,
            mood_distribution: frequency(tracks.iter().map(Track::mood_label)),
            genre_distribution: frequency(tracks.iter().map(Track::genre_label)),
        }))
    }
}

/// Orders liked tracks for display. Likes sharing a timestamp keep the
/// order they were recorded in, reversed for [`SortOrder::Recent`].
pub fn sort_liked_tracks(tracks: &mut [Track], order: SortOrder) {
    match order {
        SortOrder::Recent => {
            tracks.reverse();
            tracks.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));
        }
        SortOrder::Oldest => tracks.sort_by_key(|t| t.liked_at),
        SortOrder::Artist => tracks.sort_by_cached_key(|t| t.artist_label().to_lowercase()),
        SortOrder::Title => tracks.sort_by_cached_key(|t| t.title.to_lowercase()),
    }
}

fn track_from_row(row: &Row<'_>) -> rusqlite::Result<Track> {
    Ok(Track {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        artist: row.get(2)?,
        genre: row.get(3)?,
        mood: row.get(4)?,
        album: row.get(5)?,
        duration: row.get(6)?,
        liked_at: Some(row.get(7)?),
        ..Track::default()
    })
}

impl TrackStore for SqliteTrackStore {
    fn liked_tracks(&self, user_id: &str, mood: Option<&str>) -> Result<Vec<Track>> {
        let tracks = match mood {
            Some(mood) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{SELECT_COLUMNS} WHERE user_id = ?1 AND mood = ?2 ORDER BY id"))
                    .context("Invalid SQL when SELECTing liked tracks by mood")?;
                let rows = stmt.query_map(params![user_id, mood.trim().to_lowercase()], track_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY id"))
                    .context("Invalid SQL when SELECTing liked tracks")?;
                let rows = stmt.query_map(params![user_id], track_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            }
        }
        .with_context(|| format!("Cannot read liked tracks for {user_id}"))?;

        trace!("{} liked track(s) for {user_id} (mood: {mood:?})", tracks.len());
        Ok(tracks)
    }

    fn liked_track_ids(&self, user_id: &str) -> Result<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT track_id FROM liked_tracks WHERE user_id = ?1")
            .context("Invalid SQL when SELECTing liked track ids")?;
        let ids = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<rusqlite::Result<HashSet<String>>>()
            .with_context(|| format!("Cannot read liked track ids for {user_id}"))?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, mood: &str, genre: &str, duration: u32) -> Track {
        Track {
            id: Some(id.to_string()),
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            genre: genre.to_string(),
            mood: mood.to_string(),
            duration,
            ..Track::default()
        }
    }

    #[test]
    fn test_add_and_read_back() -> Result<()> {
        let store = SqliteTrackStore::open_in_memory()?;
        assert!(store.add_liked_track("u1", &track("1", "happy", "pop", 200))?);
        assert!(store.add_liked_track("u1", &track("2", "sad", "rock", 100))?);

        let all = store.liked_tracks("u1", None)?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id.as_deref(), Some("1"));
        assert!(all[0].liked_at.is_some());

        let happy = store.liked_tracks("u1", Some("happy"))?;
        assert_eq!(happy.len(), 1);
        assert_eq!(happy[0].genre, "pop");
        Ok(())
    }

    #[test]
    fn test_duplicate_and_idless_likes_are_rejected() -> Result<()> {
        let store = SqliteTrackStore::open_in_memory()?;
        assert!(store.add_liked_track("u1", &track("1", "happy", "pop", 0))?);
        assert!(!store.add_liked_track("u1", &track("1", "happy", "pop", 0))?);
        assert!(!store.add_liked_track("u1", &Track::default())?);
        // Another user may like the same track.
        assert!(store.add_liked_track("u2", &track("1", "happy", "pop", 0))?);
        Ok(())
    }

    #[test]
    fn test_ids_span_all_moods_and_are_per_user() -> Result<()> {
        let store = SqliteTrackStore::open_in_memory()?;
        store.add_liked_track("u1", &track("1", "happy", "pop", 0))?;
        store.add_liked_track("u1", &track("2", "sad", "pop", 0))?;
        store.add_liked_track("u2", &track("3", "sad", "pop", 0))?;

        let ids = store.liked_track_ids("u1")?;
        assert_eq!(ids, ["1".to_string(), "2".to_string()].into());
        assert!(store.liked_track_ids("nobody")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_remove_liked_track() -> Result<()> {
        let store = SqliteTrackStore::open_in_memory()?;
        store.add_liked_track("u1", &track("1", "happy", "pop", 0))?;

        assert!(store.is_liked("u1", "1")?);
        assert!(store.remove_liked_track("u1", "1")?);
        assert!(!store.remove_liked_track("u1", "1")?);
        assert!(!store.is_liked("u1", "1")?);
        Ok(())
    }

    #[test]
    fn test_mood_filter_ignores_case() -> Result<()> {
        let store = SqliteTrackStore::open_in_memory()?;
        store.add_liked_track("u1", &track("1", "Happy", "pop", 0))?;

        let happy = store.liked_tracks("u1", Some("happy"))?;
        assert_eq!(happy.len(), 1);
        assert_eq!(happy[0].mood, "happy");
        assert_eq!(store.liked_tracks("u1", Some("HAPPY"))?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_sort_liked_tracks() {
        let liked = |id: &str, title: &str, artist: &str, at: i64| Track {
            title: title.to_string(),
            artist: artist.to_string(),
            liked_at: Some(at),
            ..track(id, "happy", "pop", 0)
        };
        let tracks = vec![
            liked("1", "beta", "Zed", 100),
            liked("2", "Alpha", "amy", 300),
            liked("3", "gamma", "Bob", 200),
            liked("4", "delta", "Cat", 300),
        ];
        let order = |sort: SortOrder| {
            let mut sorted = tracks.clone();
            sort_liked_tracks(&mut sorted, sort);
            sorted.into_iter().filter_map(|t| t.id).collect::<Vec<_>>()
        };

        assert_eq!(order(SortOrder::Recent), ["4", "2", "3", "1"]);
        assert_eq!(order(SortOrder::Oldest), ["1", "3", "2", "4"]);
        assert_eq!(order(SortOrder::Artist), ["2", "3", "4", "1"]);
        assert_eq!(order(SortOrder::Title), ["2", "1", "4", "3"]);
    }

    #[test]
    fn test_user_stats() -> Result<()> {
        let store = SqliteTrackStore::open_in_memory()?;
        assert!(store.user_stats("u1")?.is_none());

        store.add_liked_track("u1", &track("1", "happy", "pop", 150))?;
        store.add_liked_track("u1", &track("2", "happy", "rock", 100))?;
        store.add_liked_track("u1", &track("3", "calm", "pop", 50))?;

        let stats = store.user_stats("u1")?.unwrap();
        assert_eq!(stats.total_tracks, 3);
        assert_eq!(stats.total_duration_minutes, 5);
        assert_eq!(
            stats.mood_distribution,
            vec![("happy".to_string(), 2), ("calm".to_string(), 1)]
        );
        assert_eq!(
            stats.genre_distribution,
            vec![("pop".to_string(), 2), ("rock".to_string(), 1)]
        );
        Ok(())
    }
}
