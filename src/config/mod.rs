//! Configuration for the feed query and API credentials.
//!
//! Read from `~/.config/oolong/config.toml` at startup. If the file doesn't
//! exist, a commented default is written there first. The cache capacity is
//! deliberately not configurable: it is a compile-time constant.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::app::{OolongError, Result};
use crate::client::FeedQuery;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub category: String,
    pub country: String,
    pub page_size: u32,
    pub api_key: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2".into(),
            category: "technology".into(),
            country: "us".into(),
            page_size: 20,
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run. Missing fields fall back to defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| OolongError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn feed_query(&self) -> FeedQuery {
        FeedQuery {
            category: self.feed.category.clone(),
            country: self.feed.country.clone(),
            page_size: self.feed.page_size,
        }
    }

    /// `~/.config/oolong/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| OolongError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("oolong").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(Self::default_config_content().as_bytes())?;
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r#"# oolong configuration
#
# The feed section controls what the sync engine fetches. The cache size
# itself is fixed at build time and is not configurable here.

[feed]
# Base URL of the news API.
endpoint = "https://newsapi.org/v2"

# Headline category and country passed to the API.
category = "technology"
country = "us"

# Articles requested per refresh.
page_size = 20

# API key. Required for real fetches; the cache and seed fallback work
# without one.
api_key = ""
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.feed.category, "technology");
        assert_eq!(config.feed.country, "us");
        assert_eq!(config.feed.page_size, 20);
        assert!(config.feed.api_key.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[feed]\ncategory = \"science\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.feed.category, "science");
        assert_eq!(config.feed.country, "us");
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "feed = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, OolongError::Config(_)));
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(Config::default_config_content()).unwrap();
        assert_eq!(config.feed.endpoint, "https://newsapi.org/v2");
    }

    #[test]
    fn test_feed_query_mirrors_config() {
        let config = Config::default();
        let query = config.feed_query();
        assert_eq!(query.category, "technology");
        assert_eq!(query.page_size, 20);
    }
}
