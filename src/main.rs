//! # Moodtune - Mood-Aware Music Recommendations
//!
//! Moodtune recommends catalog tracks for a mood, ranked by how closely they
//! resemble the tracks a user has liked under that mood.
//!
//! ## Usage
//!
//! ```bash
//! # Like a few tracks from the catalog
//! moodtune like --user alice --track-id 1204
//!
//! # Ranked recommendations, optionally genre-diversified
//! moodtune recommend --user alice --mood happy --top-n 5 --diverse
//!
//! # Detect a mood from text and recommend for it
//! moodtune detect "what a wonderful morning" --user alice
//! ```

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info, warn};
use moodtune::algorithm::Recommendation;
use moodtune::catalog::{Catalog, JsonCatalog};
use moodtune::cli::{self, Command};
use moodtune::completion;
use moodtune::config::RuntimeConfig;
use moodtune::mood::{MoodPrediction, TextMoodAnalyzer};
use moodtune::recommender::Recommender;
use moodtune::store::{sort_liked_tracks, SqliteTrackStore, TrackStore};
use moodtune::track::Track;
use serde::Serialize;

type App = Recommender<SqliteTrackStore, JsonCatalog>;

/// Builds the runtime configuration: config file first, then CLI overrides.
fn load_config(args: &cli::Args) -> Result<RuntimeConfig> {
    let mut config = match &args.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::new()?,
    };

    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog_path = catalog.clone();
    }

    debug!("Runtime configuration: {config:?}");
    Ok(config)
}

/// Opens the liked-track database and the catalog.
///
/// A missing catalog file is not fatal: recommendations simply come back empty.
fn open_app(config: &RuntimeConfig) -> Result<App> {
    let store = SqliteTrackStore::open(&config.db_path)?;

    let catalog = if config.catalog_path.exists() {
        JsonCatalog::load(&config.catalog_path)?
    } else {
        warn!(
            "No catalog at {}, continuing with an empty catalog",
            config.catalog_path.display()
        );
        JsonCatalog::default()
    };

    Ok(Recommender::with_context(store, catalog, config.ranking_context()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_track(track: &Track) {
    println!(
        "  [{}] {} - {} ({}, {})",
        track.track_id().unwrap_or("-"),
        track.artist_label(),
        track.title,
        track.genre_label(),
        track.mood_label()
    );
}

fn format_counts(values: &[(String, usize)]) -> String {
    values
        .iter()
        .map(|(value, count)| format!("{value} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// What a recommendation request produced.
#[derive(Serialize)]
#[serde(untagged)]
enum Suggestions {
    Ranked(Vec<Recommendation>),
    /// Catalog order, used when there is no history to rank against
    Unranked(Vec<Track>),
}

/// JSON shape of `detect --user`.
#[derive(Serialize)]
struct Detection<'a> {
    prediction: &'a MoodPrediction,
    recommendations: &'a Suggestions,
}

/// Ranked recommendations, or an unranked catalog list when there is no
/// history to rank against.
fn suggest(app: &App, user: &str, mood: &str, top_n: usize, diverse: bool) -> Result<Suggestions> {
    let recommendations = if diverse {
        app.diversify(user, mood, top_n)
    } else {
        app.recommend(user, mood, top_n)
    };
    if !recommendations.is_empty() {
        return Ok(Suggestions::Ranked(recommendations));
    }

    info!("No ranked results for {user} ({mood}), falling back to catalog order");
    Ok(Suggestions::Unranked(app.catalog().tracks_by_mood(mood, top_n)?))
}

fn print_suggestions(suggestions: &Suggestions, user: &str, mood: &str) {
    match suggestions {
        Suggestions::Ranked(recommendations) => {
            println!("Recommendations for {user} ({mood}):");
            for rec in recommendations {
                println!(
                    "  {:.3}  {} - {} ({})",
                    rec.similarity,
                    rec.track.artist_label(),
                    rec.track.title,
                    rec.track.genre_label()
                );
            }
        }
        Suggestions::Unranked(tracks) if tracks.is_empty() => {
            println!("No tracks found for mood `{mood}'");
        }
        Suggestions::Unranked(tracks) => {
            println!("Tracks for {mood} (like a few to get personalized results):");
            tracks.iter().for_each(print_track);
        }
    }
}

/// Main entry point for the Moodtune application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the library. Logging is controlled via `RUST_LOG`, e.g.
/// `RUST_LOG=moodtune=debug moodtune recommend ...`.
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Commands that need neither the database nor the catalog
    match &args.command {
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
            return Ok(());
        }
        Command::CompleteMoods => {
            completion::print_mood_completions();
            return Ok(());
        }
        Command::Detect { text, user: None, .. } => {
            let prediction = TextMoodAnalyzer::new().predict(text);
            if args.json {
                return print_json(&prediction);
            }
            println!("Detected mood: {} ({:.1})", prediction.mood, prediction.confidence);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&args)?;
    let app = open_app(&config)?;
    let json = args.json;

    match args.command {
        Command::Recommend {
            user,
            mood,
            top_n,
            diverse,
        } => {
            let top_n = top_n.unwrap_or(app.context().top_n);
            let suggestions = suggest(&app, &user, &mood, top_n, diverse)?;
            if json {
                print_json(&suggestions)?;
            } else {
                print_suggestions(&suggestions, &user, &mood);
            }
        }
        Command::Detect {
            text,
            user: Some(user),
            top_n,
        } => {
            let prediction = TextMoodAnalyzer::new().predict(&text);
            let top_n = top_n.unwrap_or(app.context().top_n);
            let suggestions = suggest(&app, &user, &prediction.mood, top_n, false)?;
            if json {
                print_json(&Detection {
                    prediction: &prediction,
                    recommendations: &suggestions,
                })?;
            } else {
                println!("Detected mood: {} ({:.1})", prediction.mood, prediction.confidence);
                print_suggestions(&suggestions, &user, &prediction.mood);
            }
        }
        Command::Like {
            user,
            track_id,
            mood,
        } => {
            if app.store().is_liked(&user, &track_id)? {
                println!("{user} already likes {track_id}");
                return Ok(());
            }

            let mut track = app
                .catalog()
                .track_by_id(&track_id)
                .cloned()
                .ok_or_else(|| anyhow!("Track {track_id} not found in catalog"))?;
            if let Some(mood) = mood {
                track.mood = mood;
            }

            if app.store().add_liked_track(&user, &track)? {
                info!("{user} liked {track_id}");
                println!("Liked: {} - {} ({})", track.artist_label(), track.title, track.mood_label());
            } else {
                println!("Already liked: {} - {}", track.artist_label(), track.title);
            }
        }
        Command::Unlike { user, track_id } => {
            if app.store().remove_liked_track(&user, &track_id)? {
                println!("Removed {track_id} from {user}'s liked tracks");
            } else {
                println!("{user} has not liked {track_id}");
            }
        }
        Command::Liked { user, mood, sort } => {
            let mut tracks = app.store().liked_tracks(&user, mood.as_deref())?;
            sort_liked_tracks(&mut tracks, sort);
            if json {
                print_json(&tracks)?;
            } else if tracks.is_empty() {
                println!("No liked tracks for {user}");
            } else {
                println!("Liked tracks for {user}:");
                tracks.iter().for_each(print_track);
            }
        }
        Command::Insights { user } => match app.insights(&user) {
            Some(insights) if json => print_json(&insights)?,
            Some(insights) => {
                println!("Insights for {user} ({} liked tracks):", insights.total_tracks);
                println!("  Favorite moods: {}", format_counts(&insights.favorite_moods));
                println!("  Favorite genres: {}", format_counts(&insights.favorite_genres));
                println!("  Favorite artists: {}", format_counts(&insights.favorite_artists));
                println!(
                    "  Diversity: {} mood(s), {} genre(s)",
                    insights.mood_diversity, insights.genre_diversity
                );
            }
            None if json => print_json(&serde_json::Value::Null)?,
            None => println!("No liked tracks for {user}"),
        },
        Command::Stats { user } => match app.store().user_stats(&user)? {
            Some(stats) if json => print_json(&stats)?,
            Some(stats) => {
                println!("Stats for {user}:");
                println!("  Tracks: {}", stats.total_tracks);
                println!("  Total duration: {} min", stats.total_duration_minutes);
                for (mood, count) in &stats.mood_distribution {
                    println!("  mood {mood}: {count}");
                }
                for (genre, count) in &stats.genre_distribution {
                    println!("  genre {genre}: {count}");
                }
            }
            None if json => print_json(&serde_json::Value::Null)?,
            None => println!("No liked tracks for {user}"),
        },
        Command::Search { query, limit } => {
            let found = app.catalog().search(&query, limit);
            if json {
                print_json(&found)?;
            } else if found.is_empty() {
                println!("No catalog tracks match `{query}'");
            } else {
                found.iter().for_each(print_track);
            }
        }
        Command::Completion { .. } | Command::CompleteMoods | Command::Detect { user: None, .. } => {}
    }

    Ok(())
}
