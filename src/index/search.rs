//! Relevance ranking over indexed pages
//!
//! Scoring is case-insensitive substring containment, summed per page:
//!
//! | Field | Points |
//! |-------|--------|
//! | title contains query | 10 |
//! | description contains query | 5 |
//! | each heading containing query | 3 |
//! | each paragraph containing query | 1 |

use crate::index::PageRecord;
use serde::{Deserialize, Serialize};

const TITLE_WEIGHT: u32 = 10;
const DESCRIPTION_WEIGHT: u32 = 5;
const HEADING_WEIGHT: u32 = 3;
const PARAGRAPH_WEIGHT: u32 = 1;

/// One ranked hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub description: String,
    pub relevance: u32,
}

/// Scores a single page against an already lowercased query
pub fn score_page(page: &PageRecord, query_lower: &str) -> u32 {
    let contains = |text: &str| text.to_lowercase().contains(query_lower);

    let mut score = 0;

    if contains(&page.title) {
        score += TITLE_WEIGHT;
    }

    if contains(&page.description) {
        score += DESCRIPTION_WEIGHT;
    }

    score += HEADING_WEIGHT * page.headings.iter().filter(|h| contains(&h.text)).count() as u32;
    score += PARAGRAPH_WEIGHT * page.paragraphs.iter().filter(|p| contains(p)).count() as u32;

    score
}

/// Ranks pages by relevance, highest first
///
/// Pages scoring zero are excluded. Equal scores keep the order of `pages`.
/// An empty query is a substring of every field, so it matches every page.
pub fn search(pages: &[PageRecord], query: &str) -> Vec<SearchResult> {
    let query_lower = query.to_lowercase();

    let mut results: Vec<SearchResult> = pages
        .iter()
        .filter_map(|page| {
            let relevance = score_page(page, &query_lower);
            (relevance > 0).then(|| SearchResult {
                url: page.url.clone(),
                title: page.title.clone(),
                description: page.description.clone(),
                relevance,
            })
        })
        .collect();

    // Vec::sort_by is stable, so ties stay in insertion order
    results.sort_by(|a, b| b.relevance.cmp(&a.relevance));

    results
}
