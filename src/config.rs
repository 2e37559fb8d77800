//! # Configuration Module
//!
//! Data directory layout and runtime settings for Moodtune.
//!
//! ## Data Storage
//!
//! Moodtune keeps its files in the platform-standard data directory:
//! - Linux: `~/.local/share/moodtune/`
//! - macOS: `~/Library/Application Support/moodtune/`
//! - Windows: `%APPDATA%\moodtune\`
//!
//! The directory holds the liked-track database (`moodtune.db`), the default
//! catalog export (`catalog.json`) and an optional `config.json` overriding
//! the defaults below.

use crate::algorithm::RankingContext;
use anyhow::{Context, Result};
use log::debug;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "moodtune";
const DB_FILE: &str = "moodtune.db";
const CATALOG_FILE: &str = "catalog.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the Moodtune data directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The moodtune subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let app_dir = data_dir.join(APP_DIR);
    fs::create_dir_all(&app_dir).with_context(|| {
        format!(
            "Failed to create Moodtune data directory at {}. Please check file permissions.",
            app_dir.display()
        )
    })?;

    Ok(app_dir)
}

/// Returns the platform-appropriate database file path.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined or created.
///
/// # Examples
///
/// ```no_run
/// use moodtune::config::get_db_path;
///
/// let db_path = get_db_path()?;
/// println!("Database location: {}", db_path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DB_FILE))
}

/// Returns the default catalog export path.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined or created.
pub fn get_catalog_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(CATALOG_FILE))
}

/// Returns the default configuration file path.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined or created.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(CONFIG_FILE))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Path to the liked-track database
    pub db_path: PathBuf,
    /// Path to the catalog export
    pub catalog_path: PathBuf,
    /// Candidate pool fetched from the catalog per request
    pub pool_size: usize,
    /// Recommendations returned when the caller does not ask for a count
    pub top_n: usize,
    /// Per-genre cap for diversified results
    pub per_genre_cap: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let ranking = RankingContext::default();
        Self {
            db_path: get_db_path().unwrap_or_else(|_| PathBuf::from(DB_FILE)),
            catalog_path: get_catalog_path().unwrap_or_else(|_| PathBuf::from(CATALOG_FILE)),
            pool_size: ranking.pool_size,
            top_n: ranking.top_n,
            per_genre_cap: ranking.per_genre_cap,
        }
    }
}

impl RuntimeConfig {
    /// Create a configuration from the default config file, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn new() -> Result<Self> {
        let path = get_config_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a JSON file. Missing keys keep their defaults;
    /// relative paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&data)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.db_path = resolve(&config.db_path, base)?;
        config.catalog_path = resolve(&config.catalog_path, base)?;

        debug!("Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Ranking parameters derived from this configuration.
    #[must_use]
    pub fn ranking_context(&self) -> RankingContext {
        RankingContext {
            pool_size: self.pool_size,
            top_n: self.top_n,
            per_genre_cap: self.per_genre_cap,
        }
    }
}

/// Makes `path` absolute, relative to `base` when it is not already.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read.
pub fn resolve(path: &Path, base: &Path) -> Result<PathBuf> {
    let resolved = path
        .absolutize_from(base)
        .with_context(|| format!("Cannot resolve path {}", path.display()))?;
    Ok(resolved.into_owned())
}
