//! Webdex: a polite breadth-first crawler with an in-memory search index
//!
//! This crate discovers pages from a set of seed URLs, respects robots.txt,
//! retries failed fetches with linear backoff, and ranks the indexed pages
//! against free-text queries.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod robots;
pub mod service;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Webdex operations
#[derive(Debug, Error)]
pub enum WebdexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Index file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Webdex operations
pub type Result<T> = std::result::Result<T, WebdexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEvent, CrawlObserver, CrawlReport, CrawlStats, Crawler};
pub use index::{PageIndex, PageRecord, SearchResult};
pub use url::{extract_domain, normalize_link, same_domain, FilterPattern, UrlFilter};
