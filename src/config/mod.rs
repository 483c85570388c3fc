//! Configuration module for Webdex
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use webdex::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webdex.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{hash_config_content, load_config, parse_config, read_config_with_hash};
pub use validation::{validate, validate_crawler, validate_limits, validate_start_urls};
