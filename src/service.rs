//! In-process service boundary
//!
//! [`CrawlService`] is what a transport adapter (the CLI, or an HTTP wrapper)
//! talks to: start a crawl, then query the last completed run.

use crate::config::CrawlerConfig;
use crate::crawler::{CrawlStats, Crawler};
use crate::index::{PageIndex, PageRecord, SearchResult};
use crate::WebdexError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_MAX_PAGES: usize = 20;
pub const DEFAULT_SERVICE_MAX_DEPTH: u32 = 2;
pub const DEFAULT_SERVICE_TIMEOUT: u64 = 5000;

/// Parameters of a start-crawl call
///
/// Absent or zero values fall back to the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCrawlRequest {
    pub start_url: String,
    #[serde(default)]
    pub max_pages: Option<usize>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl StartCrawlRequest {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            ..Self::default()
        }
    }
}

/// Holds the index of the last completed crawl
#[derive(Debug, Default)]
pub struct CrawlService {
    base: CrawlerConfig,
    index: Option<PageIndex>,
    stats: Option<CrawlStats>,
}

impl CrawlService {
    /// Creates a service whose crawls start from `base`
    ///
    /// Each request overrides the seeds and the page, depth and timeout
    /// limits; everything else (user agent, retry, politeness) comes from
    /// `base`.
    pub fn new(base: CrawlerConfig) -> Self {
        Self {
            base,
            index: None,
            stats: None,
        }
    }

    /// Runs a crawl to completion and makes it the current run
    ///
    /// A request that fails validation leaves the previous run in place.
    pub async fn start_crawl(&mut self, request: StartCrawlRequest) -> Result<CrawlStats, WebdexError> {
        let config = self.request_config(&request);
        tracing::info!(
            "Service crawl of {} (max_pages={}, max_depth={}, timeout={}ms)",
            request.start_url,
            config.max_pages,
            config.max_depth,
            config.timeout
        );

        let mut crawler = Crawler::new(config)?;
        let report = crawler.run().await?;
        let stats = report.stats.clone();

        self.index = Some(report.into_index());
        self.stats = Some(stats.clone());
        Ok(stats)
    }

    fn request_config(&self, request: &StartCrawlRequest) -> CrawlerConfig {
        CrawlerConfig {
            start_urls: vec![request.start_url.clone()],
            max_pages: non_zero(request.max_pages).unwrap_or(DEFAULT_SERVICE_MAX_PAGES),
            max_depth: non_zero(request.max_depth).unwrap_or(DEFAULT_SERVICE_MAX_DEPTH),
            timeout: non_zero(request.timeout).unwrap_or(DEFAULT_SERVICE_TIMEOUT),
            ..self.base.clone()
        }
    }

    /// Ranks the last run's pages; empty when no run has completed
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        match &self.index {
            Some(index) => index.search(query),
            None => Vec::new(),
        }
    }

    /// Statistics of the last completed run
    pub fn stats(&self) -> Option<&CrawlStats> {
        self.stats.as_ref()
    }

    /// Pages of the last completed run
    pub fn results(&self) -> &[PageRecord] {
        self.index.as_ref().map(|i| i.all()).unwrap_or(&[])
    }
}

fn non_zero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}
