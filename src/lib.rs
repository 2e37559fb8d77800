//! Mood-aware music recommendations from a user's liked tracks.
//!
//! Core modules:
//! - [`vectorize`] - Fixed-layout feature vectors for tracks
//! - [`algorithm`] - Similarity, preference centroids, ranking and diversification
//! - [`recommender`] - Recommendation engine over a store and a catalog
//! - [`insights`] - Listening-profile summaries
//! - [`mood`] - Keyword-based mood detection from free text
//!
//! ### Supporting Modules
//!
//! - [`track`] - The track record shared by every module
//! - [`store`] - Liked-track storage (SQLite)
//! - [`catalog`] - Candidate tracks from a JSON catalog export
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use moodtune::catalog::JsonCatalog;
//! use moodtune::recommender::Recommender;
//! use moodtune::store::SqliteTrackStore;
//!
//! let store = SqliteTrackStore::open(moodtune::config::get_db_path()?)?;
//! let catalog = JsonCatalog::load(moodtune::config::get_catalog_path()?)?;
//!
//! if let Some(track) = catalog.track_by_id("1204") {
//!     store.add_liked_track("alice", track)?;
//! }
//!
//! let recommender = Recommender::new(store, catalog);
//! for rec in recommender.recommend("alice", "happy", 5) {
//!     println!("{:.3} {} - {}", rec.similarity, rec.track.artist, rec.track.title);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Algorithm Details
//!
//! Every track maps to an 83-dimensional vector: a one-hot genre block,
//! a one-hot mood block and a hashed artist bucket. A user's taste for a
//! mood is the mean of the vectors of the tracks they liked under it.
//! Candidates for the mood are scored by cosine similarity to that mean,
//! tracks the user already liked are dropped, and the rest are returned
//! best first.
//!
//! The diversified variant ranks twice as many candidates, then keeps at
//! most two per genre so a single genre cannot fill the list.

pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod insights;
pub mod mood;
pub mod recommender;
pub mod store;
pub mod track;
pub mod vectorize;
