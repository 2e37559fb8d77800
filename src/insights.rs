//! Descriptive statistics over a user's liked tracks.
//!
//! Independent of ranking: nothing computed here feeds back into
//! [`crate::algorithm`].

use crate::track::Track;
use serde::Serialize;
use std::collections::HashMap;

/// How many values each `favorite_*` list holds at most.
pub const TOP_VALUES: usize = 5;

/// Listening profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub total_tracks: usize,
    pub favorite_moods: Vec<(String, usize)>,
    pub favorite_genres: Vec<(String, usize)>,
    pub favorite_artists: Vec<(String, usize)>,
    pub mood_diversity: usize,
    pub genre_diversity: usize,
}

/// Computes insights for `tracks`. `None` when there are no tracks.
///
/// Blank fields are counted under the same labels the vectorizer uses:
/// "neutral" for moods, "Unknown" for genres and artists.
#[must_use]
pub fn compute_insights(tracks: &[Track]) -> Option<Insights> {
    if tracks.is_empty() {
        return None;
    }

    let moods = frequency(tracks.iter().map(Track::mood_label));
    let genres = frequency(tracks.iter().map(Track::genre_label));
    let artists = frequency(tracks.iter().map(Track::artist_label));

    Some(Insights {
        total_tracks: tracks.len(),
        mood_diversity: moods.len(),
        genre_diversity: genres.len(),
        favorite_moods: most_common(moods, TOP_VALUES),
        favorite_genres: most_common(genres, TOP_VALUES),
        favorite_artists: most_common(artists, TOP_VALUES),
    })
}

/// Counts values, keeping first-seen order.
#[must_use]
pub fn frequency<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    counts
}

/// The `n` most frequent entries, descending. Ties keep first-seen order.
#[must_use]
pub fn most_common(mut counts: Vec<(String, usize)>, n: usize) -> Vec<(String, usize)> {
    counts.sort_by(|(_, a), (_, b)| b.cmp(a));
    counts.truncate(n);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(mood: &str, genre: &str, artist: &str) -> Track {
        Track {
            mood: mood.to_string(),
            genre: genre.to_string(),
            artist: artist.to_string(),
            ..Track::default()
        }
    }

    #[test]
    fn test_empty_history_has_no_insights() {
        assert!(compute_insights(&[]).is_none());
    }

    #[test]
    fn test_mood_diversity_counts_distinct_moods() {
        let moods = ["happy", "sad", "calm"];
        let tracks: Vec<Track> = (0..10)
            .map(|i| track(moods[i % 3], "pop", "Artist"))
            .collect();

        let insights = compute_insights(&tracks).unwrap();

        assert_eq!(insights.total_tracks, 10);
        assert_eq!(insights.mood_diversity, 3);
        assert_eq!(insights.genre_diversity, 1);
        assert_eq!(insights.favorite_moods[0], ("happy".to_string(), 4));
    }

    #[test]
    fn test_top_five_ties_keep_first_seen_order() {
        let artists = ["F", "E", "D", "C", "B", "A"];
        let mut tracks: Vec<Track> = artists.iter().map(|a| track("happy", "pop", a)).collect();
        tracks.push(track("happy", "pop", "A"));

        let insights = compute_insights(&tracks).unwrap();
        let names: Vec<_> = insights
            .favorite_artists
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();

        assert_eq!(names, ["A", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_blank_labels_are_counted_as_defaults() {
        let tracks = vec![track("", "", ""), track("neutral", "Unknown", "Unknown")];
        let insights = compute_insights(&tracks).unwrap();

        assert_eq!(insights.mood_diversity, 1);
        assert_eq!(insights.favorite_moods, vec![("neutral".to_string(), 2)]);
        assert_eq!(insights.favorite_genres, vec![("Unknown".to_string(), 2)]);
    }
}
