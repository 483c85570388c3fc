//! Per-page SEO analysis

use crate::index::PageRecord;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Title lengths considered optimal, in characters
pub const TITLE_OPTIMAL: RangeInclusive<usize> = 30..=60;

/// Description lengths considered optimal, in characters
pub const DESCRIPTION_OPTIMAL: RangeInclusive<usize> = 120..=160;

/// A text field with its length and whether that length is in range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthCheck {
    pub text: String,
    pub length: usize,
    pub optimal: bool,
}

impl LengthCheck {
    fn new(text: &str, optimal: &RangeInclusive<usize>) -> Self {
        let length = text.chars().count();
        Self {
            text: text.to_string(),
            length,
            optimal: optimal.contains(&length),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub url: String,
    pub title: LengthCheck,
    pub description: LengthCheck,
    pub headings: usize,
    /// Length of all paragraphs joined by a single space
    pub content_length: usize,
    pub images: usize,
    pub links: usize,
    pub images_without_alt: usize,
}

pub fn analyze_page(page: &PageRecord) -> SeoReport {
    let content_length = page.paragraphs.join(" ").chars().count();

    SeoReport {
        url: page.url.clone(),
        title: LengthCheck::new(&page.title, &TITLE_OPTIMAL),
        description: LengthCheck::new(&page.description, &DESCRIPTION_OPTIMAL),
        headings: page.headings.len(),
        content_length,
        images: page.images.len(),
        links: page.links.len(),
        images_without_alt: page.images.iter().filter(|img| img.alt.is_empty()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Heading, Image};

    #[test]
    fn test_analyze_page() {
        let mut page = PageRecord::new("https://example.com/", 0);
        page.title = "A title that is comfortably over thirty chars".to_string();
        page.description = "Too short".to_string();
        page.headings.push(Heading {
            level: "h1".to_string(),
            text: "Welcome".to_string(),
        });
        page.paragraphs = vec!["first paragraph text!".to_string(), "second one here, also long".to_string()];
        page.images = vec![
            Image {
                src: Some("/a.png".to_string()),
                alt: "A".to_string(),
            },
            Image {
                src: Some("/b.png".to_string()),
                alt: String::new(),
            },
        ];

        let report = analyze_page(&page);
        assert!(report.title.optimal);
        assert!(!report.description.optimal);
        assert_eq!(report.description.length, 9);
        assert_eq!(report.headings, 1);
        assert_eq!(report.content_length, 21 + 1 + 26);
        assert_eq!(report.images, 2);
        assert_eq!(report.images_without_alt, 1);
        assert_eq!(report.links, 0);
    }

    #[test]
    fn test_optimal_bounds_inclusive() {
        let mut page = PageRecord::new("https://example.com/", 0);
        page.title = "x".repeat(30);
        page.description = "y".repeat(160);
        let report = analyze_page(&page);
        assert!(report.title.optimal);
        assert!(report.description.optimal);

        page.title = "x".repeat(61);
        page.description = "y".repeat(119);
        let report = analyze_page(&page);
        assert!(!report.title.optimal);
        assert!(!report.description.optimal);
    }

    #[test]
    fn test_empty_page() {
        let report = analyze_page(&PageRecord::new("https://example.com/", 0));
        assert_eq!(report.title.length, 0);
        assert!(!report.title.optimal);
        assert_eq!(report.content_length, 0);
    }
}
