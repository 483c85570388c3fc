//! HTML content extraction
//!
//! This module turns a fetched document into a [`PageRecord`] and the list of
//! crawlable links it contains. Extraction never fails: malformed markup
//! yields whatever fields the HTML parser could recover, possibly empty.

use crate::index::{Heading, Image, Link, PageRecord, DEFAULT_LANGUAGE};
use crate::url::normalize_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Paragraphs at or below this many characters are not indexed
const MIN_PARAGRAPH_CHARS: usize = 20;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Content fields for the index
    pub record: PageRecord,

    /// Absolute, fragment-free link targets in document order
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts the page record and its links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the content was fetched from; base for relative links
/// * `depth` - Crawl depth of the page
///
/// # Example
///
/// ```
/// use url::Url;
/// use webdex::crawler::extract_page;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = extract_page(html, &base_url, 0);
/// assert_eq!(parsed.record.title, "Test");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_page(html: &str, page_url: &Url, depth: u32) -> ParsedPage {
    let document = Html::parse_document(html);

    let mut record = PageRecord::new(page_url.as_str(), depth);
    record.title = extract_title(&document);
    record.description = meta_content(&document, "description");
    record.keywords = meta_content(&document, "keywords");
    record.language = extract_language(&document);
    record.headings = extract_headings(&document);
    record.paragraphs = extract_paragraphs(&document);
    record.images = extract_images(&document);
    record.links = extract_anchors(&document);

    let links = extract_links(&record.links, page_url);

    ParsedPage { record, links }
}

/// Resolves anchors against `page_url`, dropping those that do not normalize
pub fn extract_links(anchors: &[Link], page_url: &Url) -> Vec<Url> {
    anchors
        .iter()
        .filter_map(|link| match normalize_link(&link.href, page_url) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::trace!("Dropping link {:?} on {}: {}", link.href, page_url, e);
                None
            }
        })
        .collect()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_title(document: &Html) -> String {
    selector("title")
        .and_then(|sel| document.select(&sel).next().map(|e| element_text(&e)))
        .unwrap_or_default()
}

fn meta_content(document: &Html, name: &str) -> String {
    selector(&format!(r#"meta[name="{}"]"#, name))
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|e| e.value().attr("content"))
                .map(|c| c.trim().to_string())
        })
        .unwrap_or_default()
}

fn extract_language(document: &Html) -> String {
    selector("html")
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|e| e.value().attr("lang"))
                .map(|l| l.trim().to_string())
        })
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

fn extract_headings(document: &Html) -> Vec<Heading> {
    let Some(sel) = selector("h1, h2, h3") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .map(|e| Heading {
            level: e.value().name().to_string(),
            text: element_text(&e),
        })
        .collect()
}

fn extract_paragraphs(document: &Html) -> Vec<String> {
    let Some(sel) = selector("p") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .map(|e| element_text(&e))
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect()
}

fn extract_images(document: &Html) -> Vec<Image> {
    let Some(sel) = selector("img") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .map(|e| Image {
            src: e.value().attr("src").map(str::to_string),
            alt: e.value().attr("alt").unwrap_or_default().to_string(),
        })
        .collect()
}

fn extract_anchors(document: &Html) -> Vec<Link> {
    let Some(sel) = selector("a[href]") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .filter_map(|e| {
            e.value().attr("href").map(|href| Link {
                text: element_text(&e),
                href: href.to_string(),
            })
        })
        .collect()
}
