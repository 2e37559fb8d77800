//! # Moodtune Performance Benchmarks
//!
//! Benchmarks for the recommendation hot path.
//!
//! ## Benchmark Categories
//!
//! - **Vectorization**: Track to feature vector conversion
//! - **Ranking**: Centroid, similarity and top-N selection
//! - **Storage**: Liked-track reads from SQLite
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench ranking
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use moodtune::algorithm::{self, RankingContext};
use moodtune::store::{SqliteTrackStore, TrackStore};
use moodtune::track::Track;
use moodtune::vectorize::{vectorize, FeatureVector, Genre, Mood};
use std::collections::HashSet;
use std::hint::black_box;

/// Helper function to create catalog-like tracks spread over genres, moods and artists
fn create_test_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            id: Some(format!("{i}")),
            title: format!("Track {i:04}"),
            artist: format!("Artist {}", i / 20),
            genre: Genre::ALL[i % Genre::ALL.len()].label().to_string(),
            mood: Mood::ALL[i % Mood::ALL.len()].label().to_string(),
            duration: 180,
            ..Track::default()
        })
        .collect()
}

fn benchmark_vectorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorization");
    let tracks = create_test_tracks(1000);

    group.bench_function("single_track", |b| b.iter(|| vectorize(black_box(&tracks[0]))));

    group.bench_function("centroid_100", |b| {
        let vectors: Vec<FeatureVector> = tracks[..100].iter().map(vectorize).collect();
        b.iter(|| algorithm::centroid(black_box(&vectors)))
    });

    group.finish();
}

fn benchmark_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let preference = vectorize(&create_test_tracks(1)[0]);
    let liked: HashSet<String> = (0..50).map(|i| i.to_string()).collect();

    for size in [50, 200, 1000] {
        let candidates = create_test_tracks(size);
        group.bench_with_input(BenchmarkId::new("rank_candidates", size), &candidates, |b, candidates| {
            b.iter_batched(
                || candidates.clone(),
                |pool| algorithm::rank_candidates(&preference, pool, &liked, 10),
                BatchSize::SmallInput,
            )
        });
    }

    let context = RankingContext::default();
    let ranked = algorithm::rank_candidates(&preference, create_test_tracks(200), &HashSet::new(), 20);
    group.bench_function("diversify_20", |b| {
        b.iter_batched(
            || ranked.clone(),
            |working_set| algorithm::diversify_ranked(working_set, 10, context.per_genre_cap),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn benchmark_storage(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage");
    let store = SqliteTrackStore::open_in_memory().expect("Failed to open database");
    for track in create_test_tracks(500) {
        store.add_liked_track("bench", &track).expect("Failed to insert track");
    }

    group.bench_function("liked_tracks_by_mood", |b| {
        b.iter(|| store.liked_tracks(black_box("bench"), Some("happy")))
    });
    group.bench_function("liked_track_ids", |b| b.iter(|| store.liked_track_ids(black_box("bench"))));

    group.finish();
}

criterion_group!(benches, benchmark_vectorization, benchmark_ranking, benchmark_storage);
criterion_main!(benches);
