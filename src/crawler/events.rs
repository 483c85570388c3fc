//! Crawl progress events
//!
//! The crawler reports progress as a stream of [`CrawlEvent`]s delivered to a
//! [`CrawlObserver`]. Presentation (log lines, terminal output) lives in the
//! observer, never in the crawl loop.

use crate::crawler::CrawlStats;
use std::time::Duration;

/// Something that happened during a crawl run
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// The run is about to dequeue its first entry
    Started {
        seeds: Vec<String>,
        max_pages: usize,
        max_depth: u32,
    },

    /// A page was fetched, extracted and appended to the index
    PageIndexed {
        url: String,
        depth: u32,
        title: String,
        links_queued: usize,
    },

    /// robots.txt disallows the URL; it was not fetched
    PageBlocked { url: String },

    /// A fetch attempt failed and another one will follow after `delay`
    RetryScheduled {
        url: String,
        attempt: u32,
        max_attempts: u32,
        delay: Duration,
        error: String,
    },

    /// All attempts failed; the URL went to the error log
    PageFailed { url: String, error: String },

    /// The frontier is empty or the page budget is exhausted
    Finished { stats: CrawlStats },
}

/// Receives crawl events in the order they happen
pub trait CrawlObserver: Send {
    fn on_event(&mut self, event: &CrawlEvent);
}

/// Observer that writes every event to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_event(&mut self, event: &CrawlEvent) {
        match event {
            CrawlEvent::Started {
                seeds,
                max_pages,
                max_depth,
            } => {
                tracing::info!(
                    "Starting crawl of {} (max pages: {}, max depth: {})",
                    seeds.join(", "),
                    max_pages,
                    max_depth
                );
            }
            CrawlEvent::PageIndexed {
                url,
                depth,
                title,
                links_queued,
            } => {
                let label = if title.is_empty() { url } else { title };
                tracing::info!(
                    "Indexed [{}] {} ({} links queued)",
                    depth,
                    label,
                    links_queued
                );
            }
            CrawlEvent::PageBlocked { url } => {
                tracing::info!("Blocked by robots.txt: {}", url);
            }
            CrawlEvent::RetryScheduled {
                url,
                attempt,
                max_attempts,
                delay,
                error,
            } => {
                tracing::warn!(
                    "Retrying {} (attempt {}/{}) in {:?}: {}",
                    url,
                    attempt,
                    max_attempts,
                    delay,
                    error
                );
            }
            CrawlEvent::PageFailed { url, error } => {
                tracing::warn!("Error crawling {}: {}", url, error);
            }
            CrawlEvent::Finished { stats } => {
                tracing::info!(
                    "Crawl complete: {} attempted, {} indexed, {} blocked, {} errors, {} left in queue",
                    stats.pages_attempted,
                    stats.pages_indexed,
                    stats.pages_blocked,
                    stats.errors,
                    stats.queue_remaining
                );
            }
        }
    }
}
