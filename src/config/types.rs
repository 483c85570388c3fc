use serde::Deserialize;

/// Default user agent sent with every request and matched against robots.txt
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; WebCrawler/1.0)";

/// Main configuration structure for Webdex
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Seed URLs, crawled at depth 0
    #[serde(default)]
    pub start_urls: Vec<String>,

    /// Maximum number of URLs dequeued for fetching in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum link distance from a seed
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Per-request timeout (milliseconds)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Total fetch attempts per URL, including the first one
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Base backoff between attempts (milliseconds); attempt `n` waits `n * retry_backoff`
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff: u64,

    /// Pause after every processed frontier entry (milliseconds)
    #[serde(default = "default_politeness_delay")]
    pub politeness_delay: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum redirect hops followed per request
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the persisted JSON index file
    #[serde(default = "default_index_path")]
    pub index_path: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_urls: Vec::new(),
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_backoff: default_retry_backoff(),
            politeness_delay: default_politeness_delay(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
        }
    }
}

fn default_max_pages() -> usize {
    50
}

fn default_max_depth() -> u32 {
    3
}

fn default_timeout() -> u64 {
    5000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    1000
}

fn default_politeness_delay() -> u64 {
    500
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_max_redirects() -> usize {
    5
}

fn default_index_path() -> String {
    "index.json".to_string()
}
