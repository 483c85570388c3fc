//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Seeding the frontier and enforcing the page and depth budgets
//! - Gating every URL through robots.txt
//! - Fetching with retry and extracting content
//! - Queueing same-host links one level deeper
//! - Pausing for the politeness delay after every processed entry

use crate::config::{validate_limits, validate_start_urls, CrawlerConfig};
use crate::crawler::events::{CrawlEvent, CrawlObserver, TracingObserver};
use crate::crawler::parser::extract_page;
use crate::crawler::scheduler::{FrontierEntry, Scheduler};
use crate::crawler::{CrawlReport, CrawlStats, Fetcher};
use crate::index::{CrawlError, PageIndex};
use crate::robots::RobotsGate;
use crate::url::{normalize_seed, same_host};
use crate::WebdexError;
use chrono::Utc;

/// Main crawler structure
///
/// One `Crawler` can run several crawls. Each run starts with a fresh
/// frontier, visited set and index, and refetches robots.txt; only rules
/// preloaded through [`Crawler::robots_mut`] carry over between runs.
pub struct Crawler {
    config: CrawlerConfig,
    fetcher: Fetcher,
    robots: RobotsGate,
    observer: Box<dyn CrawlObserver>,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// Limits are validated here; seeds are validated when a run starts.
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(WebdexError)` - Invalid limits or the HTTP client could not be built
    pub fn new(config: CrawlerConfig) -> Result<Self, WebdexError> {
        validate_limits(&config)?;

        let fetcher = Fetcher::from_config(&config)?;
        let robots = RobotsGate::new(fetcher.client().clone(), config.user_agent.clone());

        Ok(Self {
            config,
            fetcher,
            robots,
            observer: Box::new(TracingObserver),
        })
    }

    /// Replaces the default tracing observer
    pub fn with_observer(mut self, observer: impl CrawlObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Gives access to the robots gate, e.g. to preload rules
    pub fn robots_mut(&mut self) -> &mut RobotsGate {
        &mut self.robots
    }

    /// Crawls the configured start URLs
    pub async fn run(&mut self) -> Result<CrawlReport, WebdexError> {
        let seeds = self.config.start_urls.clone();
        self.crawl(&seeds).await
    }

    /// Crawls breadth-first from `seeds`
    ///
    /// Fails only when the seeds are unusable; that check happens before any
    /// network activity. Per-URL failures end up in the report's error log.
    pub async fn crawl(&mut self, seeds: &[String]) -> Result<CrawlReport, WebdexError> {
        validate_start_urls(seeds)?;
        let seed_urls = seeds
            .iter()
            .map(|s| normalize_seed(s))
            .collect::<Result<Vec<_>, _>>()?;

        self.robots.begin_run();

        let started_at = Utc::now();
        let mut scheduler = Scheduler::from_config(&self.config);
        let mut index = PageIndex::new();

        scheduler.seed(seed_urls);

        self.observer.on_event(&CrawlEvent::Started {
            seeds: seeds.to_vec(),
            max_pages: self.config.max_pages,
            max_depth: self.config.max_depth,
        });

        while let Some(entry) = scheduler.next_entry() {
            self.process_entry(&mut scheduler, &mut index, entry).await;

            // Applies to blocked and failed entries too
            scheduler.pace().await;
        }

        let (records, errors) = index.into_parts();
        let stats = CrawlStats {
            pages_attempted: scheduler.visited_count(),
            pages_indexed: records.len(),
            pages_blocked: scheduler.blocked_count(),
            errors: errors.len(),
            queue_remaining: scheduler.frontier_size(),
            started_at,
            finished_at: Utc::now(),
        };

        self.observer.on_event(&CrawlEvent::Finished {
            stats: stats.clone(),
        });

        Ok(CrawlReport {
            records,
            errors,
            stats,
        })
    }

    /// Processes a single frontier entry
    ///
    /// This method:
    /// 1. Checks robots.txt (blocked URLs are not marked visited)
    /// 2. Marks the URL visited
    /// 3. Fetches the page with retry
    /// 4. Extracts content and appends it to the index
    /// 5. Queues unvisited same-host links at `depth + 1`
    async fn process_entry(
        &mut self,
        scheduler: &mut Scheduler,
        index: &mut PageIndex,
        entry: FrontierEntry,
    ) {
        let url = entry.url;

        if !self.robots.is_allowed(&url).await {
            scheduler.mark_blocked(&url);
            self.observer.on_event(&CrawlEvent::PageBlocked {
                url: url.to_string(),
            });
            return;
        }

        if !scheduler.mark_visited(&url) {
            return;
        }

        tracing::debug!("Crawling [{}] {}", entry.depth, url);

        let observer = &mut self.observer;
        let max_attempts = self.fetcher.retry_attempts();
        let fetched = self
            .fetcher
            .fetch_with_retry(&url, |attempt, delay, error| {
                observer.on_event(&CrawlEvent::RetryScheduled {
                    url: url.to_string(),
                    attempt,
                    max_attempts,
                    delay,
                    error: error.to_string(),
                });
            })
            .await;

        let body = match fetched {
            Ok(body) => body,
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Gave up on {} after repeated timeouts", e.url());
                }
                index.record_error(CrawlError::new(e.url(), &e));
                self.observer.on_event(&CrawlEvent::PageFailed {
                    url: url.to_string(),
                    error: e.to_string(),
                });
                return;
            }
        };

        let parsed = extract_page(&body, &url, entry.depth);

        let mut links_queued = 0;
        for link in parsed.links {
            if same_host(&link, &url) && scheduler.enqueue(link, entry.depth + 1) {
                links_queued += 1;
            }
        }

        self.observer.on_event(&CrawlEvent::PageIndexed {
            url: url.to_string(),
            depth: entry.depth,
            title: parsed.record.title.clone(),
            links_queued,
        });

        index.append(parsed.record);
    }
}

/// Runs a crawl of the configured start URLs with the default observer
///
/// # Example
///
/// ```no_run
/// use webdex::config::load_config;
/// use webdex::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("webdex.toml"))?;
/// let report = run_crawl(config.crawler).await?;
/// println!("Indexed {} pages", report.stats.pages_indexed);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlerConfig) -> Result<CrawlReport, WebdexError> {
    let mut crawler = Crawler::new(config)?;
    crawler.run().await
}
