//! Learn-Harvest: a hierarchical, resumable course-content harvester
//!
//! This crate crawls a structured training course (course → learning paths →
//! modules → units), extracts structured content from each unit page, and
//! persists the result as a merge-friendly tree plus a flattened JSONL
//! training stream. Previously harvested content is reused across runs.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod links;
pub mod model;
pub mod output;
pub mod resume;

use thiserror::Error;

/// Main error type for Learn-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No data extracted from course page: {url}")]
    NoData { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Learn-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ScrapeConfig;
pub use crawler::{Crawler, Fetcher, FetchOutcome, HttpFetcher};
pub use model::{ContentBlock, CourseTree, LearningPath, Module, Unit};
