//! URL handling module for Webdex
//!
//! This module provides link normalization, hostname comparison and URL
//! filters.

mod domain;
mod filter;
mod normalize;

pub use domain::{extract_domain, origin_key, same_domain, same_host};
pub use filter::{FilterPattern, UrlFilter, REGEX_PREFIX};
pub use normalize::{normalize_link, normalize_seed};
