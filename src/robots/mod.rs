//! Robots.txt handling module
//!
//! This module fetches, parses and caches robots.txt files and answers
//! allow/deny questions for URLs. Access is fail-open: a robots.txt that
//! cannot be fetched allows everything.

mod cache;
mod parser;

pub use cache::{RobotsCache, RobotsRule};
pub use parser::{product_token, ParsedRobots};

use crate::url::origin_key;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Fetches robots.txt for an origin
///
/// Any failure (network error, timeout, non-2xx status, unreadable body)
/// yields [`RobotsRule::NoFile`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use (carries user agent and timeout)
/// * `origin` - `scheme://host[:port]` of the site
pub async fn fetch_robots(client: &Client, origin: &str) -> RobotsRule {
    let robots_url = format!("{}/robots.txt", origin);

    let response = match client.get(&robots_url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("robots.txt unreachable at {}: {}", robots_url, e);
            return RobotsRule::NoFile;
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "robots.txt at {} returned HTTP {}",
            robots_url,
            response.status().as_u16()
        );
        return RobotsRule::NoFile;
    }

    match response.text().await {
        Ok(body) => RobotsRule::Rules(ParsedRobots::from_content(&body)),
        Err(e) => {
            tracing::debug!("Failed to read robots.txt body at {}: {}", robots_url, e);
            RobotsRule::NoFile
        }
    }
}

/// Robots policy gate
///
/// The gate owns the robots cache; within a run every origin is fetched at
/// most once. [`RobotsGate::begin_run`] drops fetched rules so each run sees
/// current robots.txt files, while preloaded rules stay.
pub struct RobotsGate {
    client: Client,
    user_agent: String,
    cache: RobotsCache,
    preloaded: HashSet<String>,
}

impl RobotsGate {
    pub fn new(client: Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
            cache: RobotsCache::new(),
            preloaded: HashSet::new(),
        }
    }

    /// Forgets every fetched rule, keeping preloaded ones
    pub fn begin_run(&mut self) {
        let preloaded = &self.preloaded;
        self.cache.retain(|origin| preloaded.contains(origin));
    }

    /// Returns whether the configured user agent may fetch `url`
    pub async fn is_allowed(&mut self, url: &Url) -> bool {
        let user_agent = self.user_agent.clone();
        self.is_allowed_for(url, &user_agent).await
    }

    /// Returns whether `user_agent` may fetch `url`
    pub async fn is_allowed_for(&mut self, url: &Url, user_agent: &str) -> bool {
        let origin = origin_key(url);

        if !self.cache.contains(&origin) {
            tracing::debug!("Fetching robots.txt for {}", origin);
            let rule = fetch_robots(&self.client, &origin).await;
            self.cache.insert(origin.clone(), rule);
        } else {
            tracing::trace!("Using cached robots.txt for {}", origin);
        }

        self.cache
            .get(&origin)
            .map_or(true, |rule| rule.is_allowed(url.as_str(), user_agent))
    }

    /// Seeds the cache with a known rule for an origin
    pub fn preload(&mut self, origin: impl Into<String>, rule: RobotsRule) {
        let origin = origin.into();
        self.preloaded.insert(origin.clone());
        self.cache.insert(origin, rule);
    }

    pub fn cache(&self) -> &RobotsCache {
        &self.cache
    }
}
