//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `moodtune` binary.
//!
//! ## Commands
//!
//! - `recommend`: Ranked suggestions for a user and mood
//! - `detect`: Detect a mood from free text, optionally recommending for it
//! - `like` / `unlike`: Record or remove a liked catalog track
//! - `liked`: List a user's liked tracks
//! - `insights` / `stats`: Summaries of a user's liked tracks
//! - `search`: Find catalog tracks by title, artist or album
//!
//! ## Examples
//!
//! ```bash
//! moodtune like --user alice --track-id 1204
//! moodtune recommend --user alice --mood happy --top-n 5
//! moodtune detect "long day, feeling gloomy" --user alice
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Orderings for the liked-track list
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum SortOrder {
    /// Most recently liked first
    #[default]
    Recent,
    /// Oldest likes first
    Oldest,
    /// Artist A-Z
    Artist,
    /// Title A-Z
    Title,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "moodtune")]
#[command(about = "Moodtune: mood-aware music recommendations from your liked tracks")]
#[command(version)]
pub struct Args {
    /// Liked-track database (defaults to the platform data directory)
    #[arg(long, global = true, env = "MOODTUNE_DB")]
    pub db: Option<PathBuf>,

    /// Catalog export, a JSON list of tracks
    #[arg(long, global = true, env = "MOODTUNE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long, global = true, env = "MOODTUNE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend catalog tracks for a mood
    ///
    /// Ranks mood-tagged catalog tracks by similarity to the tracks the user
    /// liked under the same mood. With no history for that mood, falls back
    /// to an unranked list from the catalog.
    Recommend {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Mood label, e.g. happy, sad, calm
        #[arg(short, long)]
        mood: String,

        /// Number of tracks to return
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Cap each genre at a few entries for more varied results
        #[arg(long)]
        diverse: bool,
    },

    /// Detect the mood of a piece of text
    ///
    /// With `--user`, also recommends tracks for the detected mood.
    Detect {
        /// Free text describing how you feel
        text: String,

        /// Recommend for this user after detecting the mood
        #[arg(short, long)]
        user: Option<String>,

        /// Number of tracks to return
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },

    /// Mark a catalog track as liked
    Like {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Catalog track id
        #[arg(short, long)]
        track_id: String,

        /// Store the like under this mood instead of the track's own
        #[arg(short, long)]
        mood: Option<String>,
    },

    /// Remove a liked track
    Unlike {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Catalog track id
        #[arg(short, long)]
        track_id: String,
    },

    /// List a user's liked tracks
    Liked {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Only tracks liked under this mood
        #[arg(short, long)]
        mood: Option<String>,

        /// Order of the list
        #[arg(short, long, value_enum, default_value_t = SortOrder::Recent)]
        sort: SortOrder,
    },

    /// Favorite moods, genres and artists of a user
    Insights {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Totals and distributions over a user's liked tracks
    Stats {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Search the catalog by title, artist or album
    Search {
        /// Search text
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Generate shell completions
    ///
    /// Usage: moodtune completion bash > ~/.local/share/bash-completion/completions/moodtune
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List known mood labels for completion (hidden command)
    #[command(hide = true)]
    CompleteMoods,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let args = Args::parse_from([
            "moodtune", "recommend", "--user", "alice", "--mood", "happy", "-n", "5", "--diverse",
        ]);
        match args.command {
            Command::Recommend {
                user,
                mood,
                top_n,
                diverse,
            } => {
                assert_eq!(user, "alice");
                assert_eq!(mood, "happy");
                assert_eq!(top_n, Some(5));
                assert!(diverse);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_liked_sort() {
        let args = Args::parse_from(["moodtune", "liked", "-u", "alice", "--sort", "title"]);
        assert!(matches!(
            args.command,
            Command::Liked { sort: SortOrder::Title, .. }
        ));

        let args = Args::parse_from(["moodtune", "liked", "-u", "alice"]);
        assert!(matches!(
            args.command,
            Command::Liked { sort: SortOrder::Recent, .. }
        ));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from(["moodtune", "insights", "-u", "bob", "--json", "--db", "x.db"]);
        assert!(args.json);
        assert_eq!(args.db, Some(PathBuf::from("x.db")));
    }
}
