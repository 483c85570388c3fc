use crate::UrlError;
use url::Url;

/// Resolves a discovered `href` against the URL of the page that contained it
///
/// # Normalization Steps
///
/// 1. Resolve `href` as an RFC 3986 relative reference against `base`
///    (handles `/path`, `../path`, absolute URLs and same-document references)
/// 2. Reject anything that is not `http` or `https` after resolution
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after `#`)
///
/// No other canonicalization happens: query strings, trailing slashes and
/// host prefixes are kept exactly as resolved.
///
/// # Returns
///
/// * `Ok(Url)` - Absolute, fragment-free URL
/// * `Err(UrlError)` - The link is unusable and should be dropped
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webdex::url::normalize_link;
///
/// let base = Url::parse("https://example.com/blog/").unwrap();
/// let url = normalize_link("../page#top", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_link(href: &str, base: &Url) -> Result<Url, UrlError> {
    let mut url = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    Ok(url)
}

/// Parses a seed URL and strips its fragment
///
/// Seeds go through the same scheme and host checks as discovered links.
pub fn normalize_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
    normalize_link(url.as_str(), &url)
}
