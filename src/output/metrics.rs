//! Aggregate metrics and site structure over indexed pages

use crate::crawler::CrawlStats;
use crate::index::PageRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Averages across an index
///
/// `pages_attempted` is only known for a live run; an index loaded from
/// disk carries indexed pages only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlMetrics {
    pub pages_indexed: usize,
    pub pages_attempted: Option<usize>,
    /// Title, description and paragraph text per page, in KB
    pub average_page_size_kb: f64,
    pub average_links: f64,
    pub average_images: f64,
}

impl CrawlMetrics {
    pub fn from_records(records: &[PageRecord]) -> Self {
        let count = records.len();
        if count == 0 {
            return Self {
                pages_indexed: 0,
                pages_attempted: None,
                average_page_size_kb: 0.0,
                average_links: 0.0,
                average_images: 0.0,
            };
        }

        let total_size: f64 = records.iter().map(page_size_kb).sum();
        let total_links: usize = records.iter().map(|p| p.links.len()).sum();
        let total_images: usize = records.iter().map(|p| p.images.len()).sum();

        Self {
            pages_indexed: count,
            pages_attempted: None,
            average_page_size_kb: total_size / count as f64,
            average_links: total_links as f64 / count as f64,
            average_images: total_images as f64 / count as f64,
        }
    }

    /// Attaches the attempted count of a finished run
    pub fn with_stats(mut self, stats: &CrawlStats) -> Self {
        self.pages_attempted = Some(stats.pages_attempted);
        self
    }
}

fn page_size_kb(page: &PageRecord) -> f64 {
    let chars = page.title.chars().count()
        + page.description.chars().count()
        + page.paragraphs.iter().map(|p| p.chars().count()).sum::<usize>();
    chars as f64 / 1024.0
}

/// One path segment of the site tree
///
/// `page` holds the title of the page whose path ends here, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, SiteNode>,
}

impl SiteNode {
    /// Follows `path` segments from this node
    pub fn get(&self, path: &[&str]) -> Option<&SiteNode> {
        path.iter()
            .try_fold(self, |node, segment| node.children.get(*segment))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Builds a tree of the indexed pages' URL paths
///
/// Hosts are not distinguished and records with unparseable URLs are skipped.
/// A site root page sets `page` on the returned root node.
pub fn build_site_structure(records: &[PageRecord]) -> SiteNode {
    let mut root = SiteNode::default();

    for record in records {
        let Ok(url) = Url::parse(&record.url) else {
            tracing::trace!("Skipping unparseable URL in site structure: {}", record.url);
            continue;
        };

        let mut node = &mut root;
        for segment in url.path().split('/').filter(|s| !s.is_empty()) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.page = Some(record.title.clone());
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Image, Link};
    use chrono::Utc;

    fn page(url: &str, title: &str) -> PageRecord {
        let mut record = PageRecord::new(url, 0);
        record.title = title.to_string();
        record
    }

    #[test]
    fn test_metrics_averages() {
        let mut a = page("https://example.com/", "");
        a.paragraphs = vec!["x".repeat(1024)];
        a.links = vec![
            Link {
                text: "one".to_string(),
                href: "/1".to_string(),
            },
            Link {
                text: "two".to_string(),
                href: "/2".to_string(),
            },
        ];
        a.images.push(Image {
            src: None,
            alt: String::new(),
        });
        let b = page("https://example.com/b", "");

        let metrics = CrawlMetrics::from_records(&[a, b]);
        assert_eq!(metrics.pages_indexed, 2);
        assert_eq!(metrics.pages_attempted, None);
        assert!((metrics.average_page_size_kb - 0.5).abs() < f64::EPSILON);
        assert!((metrics.average_links - 1.0).abs() < f64::EPSILON);
        assert!((metrics.average_images - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_empty_index() {
        let metrics = CrawlMetrics::from_records(&[]);
        assert_eq!(metrics.pages_indexed, 0);
        assert_eq!(metrics.average_links, 0.0);
    }

    #[test]
    fn test_metrics_with_stats() {
        let now = Utc::now();
        let stats = CrawlStats {
            pages_attempted: 5,
            pages_indexed: 1,
            pages_blocked: 0,
            errors: 4,
            queue_remaining: 0,
            started_at: now,
            finished_at: now,
        };
        let metrics = CrawlMetrics::from_records(&[page("https://example.com/", "Home")])
            .with_stats(&stats);
        assert_eq!(metrics.pages_attempted, Some(5));
        assert_eq!(metrics.pages_indexed, 1);
    }

    #[test]
    fn test_site_structure() {
        let records = vec![
            page("https://example.com/", "Home"),
            page("https://example.com/docs/intro", "Intro"),
            page("https://example.com/docs/guide/", "Guide"),
            page("not a url", "Broken"),
        ];

        let root = build_site_structure(&records);
        assert_eq!(root.page.as_deref(), Some("Home"));

        let docs = root.get(&["docs"]).unwrap();
        assert_eq!(docs.page, None);
        assert_eq!(docs.children.len(), 2);

        let intro = root.get(&["docs", "intro"]).unwrap();
        assert_eq!(intro.page.as_deref(), Some("Intro"));
        assert!(intro.is_leaf());
        assert_eq!(
            root.get(&["docs", "guide"]).unwrap().page.as_deref(),
            Some("Guide")
        );
        assert!(root.get(&["missing"]).is_none());
    }
}
