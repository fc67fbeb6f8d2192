//! Configuration types for marquee.
//!
//! [`Config::load`] reads `~/.config/marquee/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[feed]
country       = "us"
popular_limit = 25
top_limit     = 10

[ui]
grid_columns       = 3
show_release_dates = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/marquee/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[feed]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Two-letter storefront country code in the feed URL.
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_popular_limit")]
    pub popular_limit: u8,
    #[serde(default = "default_top_limit")]
    pub top_limit: u8,
}

fn default_country() -> String { "us".to_string() }
fn default_popular_limit() -> u8 { 25 }
fn default_top_limit() -> u8 { 10 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            popular_limit: default_popular_limit(),
            top_limit: default_top_limit(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u16,
    #[serde(default = "default_show_release_dates")]
    pub show_release_dates: bool,
}

fn default_grid_columns() -> u16 { 3 }
fn default_show_release_dates() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            grid_columns: default_grid_columns(),
            show_release_dates: default_show_release_dates(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/marquee/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path, creating it with defaults when missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("marquee")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
