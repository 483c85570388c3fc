//! Scheduler for managing the crawl frontier
//!
//! This module handles:
//! - The FIFO frontier of (url, depth) entries, which makes the crawl breadth-first
//! - The visited set, which grows monotonically and bounds the page budget
//! - Robots-blocked URLs, which are remembered but do not consume budget
//! - The politeness delay between frontier entries

use crate::config::CrawlerConfig;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// Link distance from a seed (seeds are 0)
    pub depth: u32,
}

/// Scheduler owns the frontier queue and the visited set
///
/// All state is owned by the single crawl task, so checks and insertions
/// never race.
#[derive(Debug)]
pub struct Scheduler {
    /// FIFO queue of URLs to fetch
    frontier: VecDeque<FrontierEntry>,

    /// URLs dequeued for fetching, whatever their outcome
    visited: HashSet<String>,

    /// URLs skipped because robots.txt disallows them
    blocked: HashSet<String>,

    max_pages: usize,
    max_depth: u32,
    politeness_delay: Duration,
}

impl Scheduler {
    /// Creates a new scheduler with an empty frontier
    ///
    /// # Arguments
    ///
    /// * `max_pages` - Upper bound on the visited set
    /// * `max_depth` - Entries deeper than this are discarded when dequeued
    /// * `politeness_delay` - Pause applied by [`Scheduler::pace`]
    pub fn new(max_pages: usize, max_depth: u32, politeness_delay: Duration) -> Self {
        Self {
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            blocked: HashSet::new(),
            max_pages,
            max_depth,
            politeness_delay,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            config.max_pages,
            config.max_depth,
            Duration::from_millis(config.politeness_delay),
        )
    }

    /// Queues every seed at depth 0, in order
    pub fn seed<I>(&mut self, seeds: I)
    where
        I: IntoIterator<Item = Url>,
    {
        for url in seeds {
            self.frontier.push_back(FrontierEntry { url, depth: 0 });
        }
    }

    /// Returns true while the visited set is below the page budget
    pub fn has_budget(&self) -> bool {
        self.visited.len() < self.max_pages
    }

    /// Dequeues the next entry eligible for fetching
    ///
    /// Entries already visited, already blocked, or deeper than `max_depth`
    /// are discarded. Returns `None` when the frontier is empty or the page
    /// budget is exhausted.
    pub fn next_entry(&mut self) -> Option<FrontierEntry> {
        while self.has_budget() {
            let entry = self.frontier.pop_front()?;
            let key = entry.url.as_str();

            if self.visited.contains(key) || self.blocked.contains(key) {
                tracing::trace!("Skipping already seen URL: {}", key);
                continue;
            }

            if entry.depth > self.max_depth {
                tracing::trace!("Skipping {} at depth {}", key, entry.depth);
                continue;
            }

            return Some(entry);
        }

        None
    }

    /// Marks a URL visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Remembers a robots-blocked URL without consuming page budget
    pub fn mark_blocked(&mut self, url: &Url) {
        self.blocked.insert(url.as_str().to_string());
    }

    /// Adds a discovered URL to the back of the frontier
    ///
    /// Returns false (and queues nothing) when the URL was already visited or
    /// blocked. Duplicates still waiting in the queue are resolved at dequeue.
    pub fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if self.is_visited(&url) || self.blocked.contains(url.as_str()) {
            return false;
        }

        self.frontier.push_back(FrontierEntry { url, depth });
        true
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Waits out the politeness delay
    pub async fn pace(&self) {
        if !self.politeness_delay.is_zero() {
            tokio::time::sleep(self.politeness_delay).await;
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Returns the current size of the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }
}
