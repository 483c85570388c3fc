//! Per-run robots.txt cache
//!
//! Each origin is fetched at most once per crawl run. A failed fetch is cached
//! as [`RobotsRule::NoFile`] so it is not retried for the rest of the run.

use crate::robots::ParsedRobots;
use std::collections::HashMap;

/// Crawl rules known for one origin
#[derive(Debug, Clone)]
pub enum RobotsRule {
    /// robots.txt was fetched and parsed
    Rules(ParsedRobots),
    /// robots.txt was missing or unreachable; everything is allowed
    NoFile,
}

impl RobotsRule {
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match self {
            Self::Rules(robots) => robots.is_allowed(url, user_agent),
            Self::NoFile => true,
        }
    }
}

/// Origin-keyed rule cache
#[derive(Debug, Clone, Default)]
pub struct RobotsCache {
    rules: HashMap<String, RobotsRule>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, origin: &str) -> Option<&RobotsRule> {
        self.rules.get(origin)
    }

    pub fn insert(&mut self, origin: impl Into<String>, rule: RobotsRule) {
        self.rules.insert(origin.into(), rule);
    }

    /// Keeps only the origins for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.rules.retain(|origin, _| keep(origin));
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.rules.contains_key(origin)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
