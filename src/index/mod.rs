//! Page index module
//!
//! The index is an append-only list of [`PageRecord`]s in discovery order,
//! plus the log of URLs that failed. It does not deduplicate: the scheduler's
//! visited set guarantees at most one record per URL.

mod record;
mod search;

pub use record::{CrawlError, Heading, Image, Link, PageRecord, DEFAULT_LANGUAGE};
pub use search::{score_page, search, SearchResult};

/// In-memory store of extracted pages and crawl errors
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    pages: Vec<PageRecord>,
    errors: Vec<CrawlError>,
}

impl PageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; insertion order is discovery order
    pub fn append(&mut self, record: PageRecord) {
        self.pages.push(record);
    }

    /// Appends an entry to the error log
    pub fn record_error(&mut self, error: CrawlError) {
        self.errors.push(error);
    }

    /// All records in insertion order
    pub fn all(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn errors(&self) -> &[CrawlError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Replaces the index content with previously persisted records
    ///
    /// The error log belongs to a live run and is cleared.
    pub fn load_records(&mut self, records: Vec<PageRecord>) {
        self.pages = records;
        self.errors.clear();
    }

    /// Builds an index directly from persisted records
    pub fn from_records(records: Vec<PageRecord>) -> Self {
        let mut index = Self::new();
        index.load_records(records);
        index
    }

    /// Ranks the indexed pages against `query`
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search(&self.pages, query)
    }

    /// Consumes the index, returning its records and error log
    pub fn into_parts(self) -> (Vec<PageRecord>, Vec<CrawlError>) {
        (self.pages, self.errors)
    }
}
