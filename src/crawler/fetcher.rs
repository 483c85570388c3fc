//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests with Content-Type validation
//! - Retry with linear backoff for any failed attempt
//! - Error classification

use crate::config::CrawlerConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failure of a single fetch attempt
///
/// Every variant is retryable; the caller records a crawl error only after
/// the last attempt fails.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Not HTML content for {url}: {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::Status { url, .. }
            | Self::NotHtml { url, .. }
            | Self::Body { url, .. } => url,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use webdex::config::CrawlerConfig;
/// use webdex::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.timeout))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher with bounded retry
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl Fetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use
    /// * `retry_attempts` - Total attempts per URL, including the first (minimum 1)
    /// * `retry_backoff` - Base wait; the wait after attempt `n` is `n * retry_backoff`
    pub fn new(client: Client, retry_attempts: u32, retry_backoff: Duration) -> Self {
        Self {
            client,
            retry_attempts: retry_attempts.max(1),
            retry_backoff,
        }
    }

    /// Builds a client from the configuration and wraps it
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::new(
            client,
            config.retry_attempts,
            Duration::from_millis(config.retry_backoff),
        ))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// Wait before the attempt following `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_backoff * attempt
    }

    /// Fetches a URL once and returns its HTML body
    ///
    /// Fails on network error, timeout, non-2xx status, or a Content-Type that
    /// does not contain `text/html`.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let url_str = url.as_str();

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url_str.to_string(),
                }
            } else {
                FetchError::Network {
                    url: url_str.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::NotHtml {
                url: url_str.to_string(),
                content_type,
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url_str.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url_str.to_string(),
                    source: e,
                }
            }
        })
    }

    /// Fetches a URL, retrying failed attempts with linear backoff
    ///
    /// `on_retry` is called before each wait with the number of the upcoming
    /// attempt, the wait duration and the error that caused the retry.
    ///
    /// # Retry Logic
    ///
    /// | Attempt failed | Wait before next |
    /// |----------------|------------------|
    /// | 1 | 1 × backoff |
    /// | 2 | 2 × backoff |
    /// | last | none, error returned |
    pub async fn fetch_with_retry<F>(&self, url: &Url, mut on_retry: F) -> Result<String, FetchError>
    where
        F: FnMut(u32, Duration, &FetchError),
    {
        let mut attempt = 1;

        loop {
            match self.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retry_attempts => {
                    let delay = self.backoff(attempt);
                    on_retry(attempt + 1, delay, &e);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
