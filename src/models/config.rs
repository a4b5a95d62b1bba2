//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and fetching behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Block segmentation settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.retry_attempts == 0 {
            return Err(AppError::validation("crawler.retry_attempts must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if url::Url::parse(&self.crawler.base_url).is_err() {
            return Err(AppError::validation("crawler.base_url is not a valid URL"));
        }
        if self.segmenter.max_walk_hops == 0 {
            return Err(AppError::validation("segmenter.max_walk_hops must be > 0"));
        }
        if self.storage.batch_size == 0 {
            return Err(AppError::validation("storage.batch_size must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and fetching behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Fetch attempts per page before recording a failure
    #[serde(default = "defaults::retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed sleep between retry attempts in milliseconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,

    /// Politeness delay between successive fetches in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent page fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Base URL that seed paths are resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retry_attempts: defaults::retry_attempts(),
            retry_delay_ms: defaults::retry_delay(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            base_url: defaults::base_url(),
        }
    }
}

/// Block segmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Maximum preceding-sibling hops when attributing a table to a heading
    #[serde(default = "defaults::max_walk_hops")]
    pub max_walk_hops: usize,

    /// Minimum length for a paragraph to qualify as the program description
    #[serde(default = "defaults::min_description_len")]
    pub min_description_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_walk_hops: defaults::max_walk_hops(),
            min_description_len: defaults::min_description_len(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path
    #[serde(default = "defaults::db_path")]
    pub db_path: String,

    /// Maximum rows per insert batch
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::db_path(),
            batch_size: defaults::batch_size(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum console log level (debug, info, warn, error)
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Print per-program progress lines during a run
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; catalog-crawler/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn retry_attempts() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        1000
    }
    pub fn request_delay() -> u64 {
        250
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn base_url() -> String {
        "https://www.mcgill.ca".into()
    }

    // Segmenter defaults
    pub fn max_walk_hops() -> usize {
        8
    }
    pub fn min_description_len() -> usize {
        80
    }

    // Storage defaults
    pub fn db_path() -> String {
        "data/catalog.sqlite".into()
    }
    pub fn batch_size() -> usize {
        200
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}
