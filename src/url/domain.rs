use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webdex::url::extract_domain;
///
/// let url = Url::parse("https://Sub.Example.com:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs have exactly the same hostname
///
/// This is exact string equality, not a suffix match: `sub.example.com` and
/// `example.com` are different domains. Ports are ignored.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// String form of [`same_host`]; unparseable input is never the same domain
///
/// # Examples
///
/// ```
/// use webdex::url::same_domain;
///
/// assert!(same_domain("https://example.com/a", "https://example.com/b"));
/// assert!(!same_domain("https://sub.example.com", "https://example.com"));
/// ```
pub fn same_domain(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => same_host(&a, &b),
        _ => false,
    }
}

/// Key identifying the robots.txt scope of a URL: `scheme://host[:port]`
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}
