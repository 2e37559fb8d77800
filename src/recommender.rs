//! Mood-based recommendation over a track store and a catalog.
//!
//! [`Recommender`] fetches inputs from its collaborators and hands them to
//! the pure functions in [`crate::algorithm`] and [`crate::insights`].
//! Collaborator failures never escape: they are logged and the affected
//! step degrades to an empty result.
//!
//! An empty recommendation list is a normal outcome (no history for the
//! mood, or nothing left after filtering). Callers decide whether to fall
//! back to an unranked catalog fetch.

use crate::algorithm::{self, RankingContext, Recommendation};
use crate::catalog::Catalog;
use crate::insights::{self, Insights};
use crate::store::TrackStore;
use crate::vectorize::FeatureVector;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Recommendation engine bound to a store and a catalog.
pub struct Recommender<S, C> {
    store: S,
    catalog: C,
    context: RankingContext,
}

impl<S: TrackStore, C: Catalog> Recommender<S, C> {
    #[must_use]
    pub fn new(store: S, catalog: C) -> Self {
        Self::with_context(store, catalog, RankingContext::default())
    }

    #[must_use]
    pub fn with_context(store: S, catalog: C, context: RankingContext) -> Self {
        Self {
            store,
            catalog,
            context,
        }
    }

    #[must_use]
    pub fn context(&self) -> &RankingContext {
        &self.context
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Centroid of the user's liked tracks for `mood`.
    ///
    /// `None` when the user has liked nothing under that mood, or the store
    /// could not be read.
    #[must_use]
    pub fn user_preference(&self, user_id: &str, mood: &str) -> Option<FeatureVector> {
        let liked = match self.store.liked_tracks(user_id, Some(mood)) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("Could not read liked tracks for {user_id} ({mood}): {e:#}");
                return None;
            }
        };

        if liked.is_empty() {
            debug!("No liked tracks for {user_id} under mood `{mood}'");
            return None;
        }

        let vectors: Vec<FeatureVector> = algorithm::batch_vectorize(&liked)
            .map(|(_, vector)| vector)
            .collect();
        algorithm::centroid(&vectors)
    }

    /// Up to `top_n` catalog tracks for `mood`, most similar to the user's taste first.
    ///
    /// Tracks the user already liked, under any mood, are never returned.
    #[must_use]
    pub fn recommend(&self, user_id: &str, mood: &str, top_n: usize) -> Vec<Recommendation> {
        let Some(preference) = self.user_preference(user_id, mood) else {
            info!("No preferences for {user_id} under mood `{mood}'");
            return Vec::new();
        };

        let pool_size = self.context.pool_for(top_n);
        let candidates = match self.catalog.tracks_by_mood(mood, pool_size) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("Catalog unavailable for mood `{mood}': {e:#}");
                return Vec::new();
            }
        };
        if candidates.is_empty() {
            info!("No candidate tracks for mood `{mood}'");
            return Vec::new();
        }

        let liked_ids = self.store.liked_track_ids(user_id).unwrap_or_else(|e| {
            warn!("Could not read liked track ids for {user_id}, not filtering: {e:#}");
            HashSet::new()
        });

        let recommendations = algorithm::rank_candidates(&preference, candidates, &liked_ids, top_n);
        info!(
            "Generated {} recommendation(s) for {user_id}, mood `{mood}'",
            recommendations.len()
        );
        recommendations
    }

    /// Like [`Self::recommend`], but with each genre capped so no single
    /// genre dominates.
    #[must_use]
    pub fn diversify(&self, user_id: &str, mood: &str, top_n: usize) -> Vec<Recommendation> {
        let working_set = self.recommend(user_id, mood, top_n.saturating_mul(2));
        if working_set.is_empty() {
            return working_set;
        }

        algorithm::diversify_ranked(working_set, top_n, self.context.per_genre_cap)
    }

    /// Listening profile over everything the user has liked.
    #[must_use]
    pub fn insights(&self, user_id: &str) -> Option<Insights> {
        match self.store.liked_tracks(user_id, None) {
            Ok(tracks) => insights::compute_insights(&tracks),
            Err(e) => {
                warn!("Could not read liked tracks for {user_id}: {e:#}");
                None
            }
        }
    }
}
