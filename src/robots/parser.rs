//! Matching of URLs against a robots.txt body

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
///
/// A thin wrapper around the robotstxt matcher. The raw body is kept and
/// matched on demand, since the matcher itself is not reusable across calls.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks an absolute URL against the rules for `user_agent`
    ///
    /// Only the leading product token of the user agent is matched against
    /// `User-agent` lines, so `Mozilla/5.0 (compatible; ...)` is `Mozilla`.
    /// A blank body allows everything.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, product_token(user_agent), url)
    }
}

/// Leading product token of a user agent: text before the first `/` or space
///
/// Falls back to the trimmed input when it starts with a separator.
pub fn product_token(user_agent: &str) -> &str {
    let trimmed = user_agent.trim();
    let token = trimmed
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    if token.is_empty() {
        trimmed
    } else {
        token
    }
}
