//! Page and error records stored in the index

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language assumed when a page does not declare one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Everything extracted from one successfully fetched page
///
/// Records are immutable once appended to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub headings: Vec<Heading>,
    /// Trimmed paragraph texts longer than 20 characters, in document order
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Link distance from the seed this page was reached from
    #[serde(default)]
    pub depth: u32,
    pub crawled_at: DateTime<Utc>,
}

/// A heading (`h1`..`h3`) with its tag name as level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: String,
}

/// An anchor as written in the page; `href` is not resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// A URL whose fetch or extraction failed after all retries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlError {
    pub url: String,
    pub error: String,
}

impl PageRecord {
    /// Creates a record with empty content fields, stamped with the current time
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            keywords: String::new(),
            language: default_language(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            images: Vec::new(),
            links: Vec::new(),
            depth,
            crawled_at: Utc::now(),
        }
    }
}

impl CrawlError {
    pub fn new(url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            url: url.into(),
            error: error.to_string(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = PageRecord::new("https://example.com/", 2);
        assert_eq!(record.url, "https://example.com/");
        assert_eq!(record.depth, 2);
        assert_eq!(record.language, "en");
        assert!(record.title.is_empty());
        assert!(record.headings.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = PageRecord::new("https://example.com/", 0);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("crawledAt").is_some());
        assert!(json.get("crawled_at").is_none());
    }

    #[test]
    fn test_image_without_src_omits_field() {
        let image = Image {
            src: None,
            alt: "logo".to_string(),
        };
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, r#"{"alt":"logo"}"#);
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"url":"https://example.com/","title":"Home","crawledAt":"2024-05-01T10:00:00.000Z"}"#;
        let record: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Home");
        assert_eq!(record.language, "en");
        assert_eq!(record.depth, 0);
        assert!(record.paragraphs.is_empty());
    }
}
