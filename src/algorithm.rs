//! Similarity ranking for mood-based recommendations.
//!
//! Everything here is pure: vectors and candidate pools go in, ordered
//! [`Recommendation`]s come out. Fetching from the store and the catalog is
//! the job of [`crate::recommender`].

use crate::track::Track;
use crate::vectorize::{vectorize, FeatureVector, FEATURE_DIM};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Immutable ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingContext {
    /// How many catalog tracks to fetch as the candidate pool.
    pub pool_size: usize,
    /// Default number of recommendations to return.
    pub top_n: usize,
    /// Maximum entries per genre in diversified results.
    pub per_genre_cap: usize,
}

impl Default for RankingContext {
    fn default() -> Self {
        Self {
            pool_size: 50,
            top_n: 10,
            per_genre_cap: 2,
        }
    }
}

impl RankingContext {
    /// Candidate pool size for a request of `top_n`, widened so the pool
    /// always exceeds `top_n`.
    #[must_use]
    pub fn pool_for(&self, top_n: usize) -> usize {
        self.pool_size.max(top_n.saturating_add(1))
    }
}

/// A candidate track with its similarity to the user's preference vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub track: Track,
    pub similarity: f32,
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero magnitude, so the result is never NaN.
#[must_use]
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f32 {
    let (a, b) = (a.as_slice(), b.as_slice());
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Component-wise arithmetic mean, every vector weighted equally.
///
/// `None` for an empty input: "no preference" is distinct from a zero vector.
#[must_use]
pub fn centroid(vectors: &[FeatureVector]) -> Option<FeatureVector> {
    if vectors.is_empty() {
        return None;
    }

    let mut sum = vec![0.0f32; FEATURE_DIM];
    for vector in vectors {
        for (acc, &x) in sum.iter_mut().zip(vector.as_slice()) {
            *acc += x;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let count = vectors.len() as f32;
    FeatureVector::from_vec(sum.into_iter().map(|x| x / count).collect())
}

/// Vectorizes a batch of tracks lazily.
#[must_use = "Iterator should be consumed to vectorize tracks"]
pub fn batch_vectorize<'a>(
    tracks: &'a [Track],
) -> impl Iterator<Item = (&'a Track, FeatureVector)> + 'a {
    tracks.iter().map(|track| (track, vectorize(track)))
}

/// Ranks `candidates` against `preference`.
///
/// Candidates whose id is in `liked_ids` are dropped. The rest are sorted by
/// descending similarity; the sort is stable, so equal scores keep pool
/// order. At most `top_n` entries are returned.
#[must_use]
pub fn rank_candidates(
    preference: &FeatureVector,
    candidates: Vec<Track>,
    liked_ids: &HashSet<String>,
    top_n: usize,
) -> Vec<Recommendation> {
    let pool_len = candidates.len();
    let mut ranked: Vec<Recommendation> = candidates
        .into_iter()
        .filter(|track| track.track_id().map_or(true, |id| !liked_ids.contains(id)))
        .map(|track| {
            let similarity = cosine_similarity(preference, &vectorize(&track));
            Recommendation { track, similarity }
        })
        .collect();

    log::debug!(
        "Ranking {} of {} candidates ({} excluded as already liked)",
        ranked.len(),
        pool_len,
        pool_len - ranked.len()
    );

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    ranked.truncate(top_n);
    ranked
}

/// Caps each genre's contribution to `per_genre` entries.
///
/// `ranked` must already be sorted. Genres are visited in first-seen order,
/// taking each group's best entries until `top_n` is reached or the groups
/// run out; the result is then re-sorted by similarity (stable) and
/// truncated to `top_n`.
#[must_use]
pub fn diversify_ranked(
    ranked: Vec<Recommendation>,
    top_n: usize,
    per_genre: usize,
) -> Vec<Recommendation> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Recommendation>> = Vec::new();

    for rec in ranked {
        let genre = rec.track.genre.clone();
        let slot = *index.entry(genre).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(rec);
    }

    let mut diverse = Vec::with_capacity(top_n);
    for group in groups {
        if diverse.len() >= top_n {
            break;
        }
        diverse.extend(group.into_iter().take(per_genre));
    }

    diverse.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    diverse.truncate(top_n);
    diverse
}
