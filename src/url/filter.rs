use crate::index::PageRecord;
use crate::UrlError;
use regex::Regex;

/// Prefix that marks a filter argument as a regular expression
pub const REGEX_PREFIX: &str = "re:";

/// A single URL filter value
#[derive(Debug, Clone)]
pub enum FilterPattern {
    /// Matches when the URL contains the text
    Substring(String),
    /// Matches when the regular expression finds a match anywhere in the URL
    Pattern(Regex),
}

impl FilterPattern {
    /// Parses a filter argument; `re:<expr>` is a regex, anything else a substring
    ///
    /// # Examples
    ///
    /// ```
    /// use webdex::url::FilterPattern;
    ///
    /// assert!(FilterPattern::parse("/blog/").unwrap().matches("https://example.com/blog/post"));
    /// assert!(FilterPattern::parse(r"re:/\d{4}/").unwrap().matches("https://example.com/2024/post"));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        match raw.strip_prefix(REGEX_PREFIX) {
            Some(expr) => Regex::new(expr)
                .map(Self::Pattern)
                .map_err(|e| UrlError::Parse(format!("invalid filter pattern '{}': {}", expr, e))),
            None => Ok(Self::Substring(raw.to_string())),
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Substring(text) => url.contains(text.as_str()),
            Self::Pattern(regex) => regex.is_match(url),
        }
    }
}

/// A set of URL filters combined with OR semantics
///
/// An empty filter set matches every URL.
#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    patterns: Vec<FilterPattern>,
}

impl UrlFilter {
    pub fn new(patterns: Vec<FilterPattern>) -> Self {
        Self { patterns }
    }

    /// Parses every raw argument with [`FilterPattern::parse`]
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Self, UrlError> {
        let patterns = raw
            .iter()
            .map(|p| FilterPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(patterns))
    }

    pub fn add(&mut self, pattern: FilterPattern) {
        self.patterns.push(pattern);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, url: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        self.patterns.iter().any(|p| p.matches(url))
    }

    /// Keeps the records whose URL matches, preserving order
    pub fn select<'a>(&self, records: &'a [PageRecord]) -> Vec<&'a PageRecord> {
        records.iter().filter(|r| self.matches(&r.url)).collect()
    }
}
