//! Result of a crawl run

use crate::index::{CrawlError, PageIndex, PageRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one crawl run
///
/// `pages_attempted` is the size of the visited set: every URL dequeued for
/// fetching, whether it was indexed or failed. Robots-blocked URLs are only
/// counted in `pages_blocked`. No ratio is derived here; consumers pick the
/// denominator they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStats {
    pub pages_attempted: usize,
    pub pages_indexed: usize,
    pub pages_blocked: usize,
    pub errors: usize,
    pub queue_remaining: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Records, error log and statistics of a completed run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub records: Vec<PageRecord>,
    pub errors: Vec<CrawlError>,
    pub stats: CrawlStats,
}

impl CrawlReport {
    /// Turns the report into a searchable index, keeping the error log
    pub fn into_index(self) -> PageIndex {
        let mut index = PageIndex::from_records(self.records);
        for error in self.errors {
            index.record_error(error);
        }
        index
    }
}
