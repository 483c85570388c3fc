//! Storage module for persisting the page index
//!
//! The index is saved as a single pretty-printed JSON document:
//!
//! ```json
//! {
//!   "crawledAt": "2024-05-01T10:00:00Z",
//!   "statistics": { "totalPages": 2, "totalErrors": 1 },
//!   "pages": [ ... ]
//! }
//! ```

use crate::index::{PageIndex, PageRecord};
use crate::WebdexError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk representation of a crawl's index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    pub crawled_at: DateTime<Utc>,
    pub statistics: IndexStatistics,
    pub pages: Vec<PageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatistics {
    pub total_pages: usize,
    pub total_errors: usize,
}

impl IndexFile {
    /// Snapshots an index, stamped with the current time
    pub fn from_index(index: &PageIndex) -> Self {
        Self {
            crawled_at: Utc::now(),
            statistics: IndexStatistics {
                total_pages: index.len(),
                total_errors: index.errors().len(),
            },
            pages: index.all().to_vec(),
        }
    }

    /// Establishes the persisted pages as the content of a fresh index
    pub fn into_index(self) -> PageIndex {
        PageIndex::from_records(self.pages)
    }
}

/// Writes the index to `path`, replacing any existing file
pub fn save_index(index: &PageIndex, path: &Path) -> Result<IndexFile, WebdexError> {
    let file = IndexFile::from_index(index);

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &file)?;
    writer.flush()?;

    tracing::info!("Index saved to: {}", path.display());
    Ok(file)
}

/// Reads an index file written by [`save_index`]
pub fn load_index(path: &Path) -> Result<IndexFile, WebdexError> {
    let reader = BufReader::new(File::open(path)?);
    let file: IndexFile = serde_json::from_reader(reader)?;

    tracing::debug!(
        "Loaded {} pages from {}",
        file.pages.len(),
        path.display()
    );
    Ok(file)
}
