//! Output module for exporting and summarizing an index
//!
//! This module handles:
//! - Exporting records as JSON, CSV or XML
//! - Per-page SEO analysis
//! - Aggregate metrics and the site structure tree

mod export;
mod metrics;
mod seo;

pub use export::{escape_xml, export_records, write_export, ExportFormat, CSV_HEADERS};
pub use metrics::{build_site_structure, CrawlMetrics, SiteNode};
pub use seo::{analyze_page, LengthCheck, SeoReport};

use thiserror::Error;

/// Errors that can occur while producing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported export format: {0}")]
    UnknownFormat(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
