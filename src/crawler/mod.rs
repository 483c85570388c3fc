//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML content and link extraction
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination and progress events

mod coordinator;
mod events;
mod fetcher;
mod parser;
mod report;
mod scheduler;

pub use coordinator::{run_crawl, Crawler};
pub use events::{CrawlEvent, CrawlObserver, TracingObserver};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use parser::{extract_links, extract_page, ParsedPage};
pub use report::{CrawlReport, CrawlStats};
pub use scheduler::{FrontierEntry, Scheduler};
