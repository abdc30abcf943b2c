//! URL Utility Functions
//!
//! Validation, host normalization and suffix matching for candidate links,
//! plus unwrapping of search-engine redirect links.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Lowercase a hostname and strip a trailing dot and a leading `www.`.
///
/// ```
/// use search_digest::url_utils::normalize_host;
///
/// assert_eq!(normalize_host("WWW.Apple.com."), "apple.com");
/// assert_eq!(normalize_host("news.bbc.com"), "news.bbc.com");
/// ```
#[must_use]
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Extract the normalized hostname from a URL.
#[must_use]
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(normalize_host).filter(|h| !h.is_empty())
}

/// Whether `host` equals `suffix` or ends with `.suffix`.
///
/// Matching is on label boundaries: `news.bbc.com` matches `bbc.com`,
/// `notbbc.com` does not.
#[must_use]
pub fn host_matches_suffix(host: &str, suffix: &str) -> bool {
    if host == suffix {
        return true;
    }
    host.len() > suffix.len()
        && host.ends_with(suffix)
        && host.as_bytes()[host.len() - suffix.len() - 1] == b'.'
}

/// Normalize a URL by removing the fragment and a trailing path slash.
#[must_use]
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(&path[..path.len() - 1]);
    }

    url.to_string()
}

/// Resolve an `href` found on a results page into an absolute target URL.
///
/// Handles protocol-relative links (`//example.com/x`), links relative to
/// the results page, and redirect wrappers of the form `/l/?uddg=<target>`,
/// which are unwrapped to their target.
///
/// ```
/// use search_digest::url_utils::resolve_result_href;
///
/// let base = url::Url::parse("https://html.duckduckgo.com/html/").unwrap();
/// let target = resolve_result_href(
///     "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.apple.com%2Fiphone%2F&rut=abc",
///     &base,
/// );
/// assert_eq!(target.unwrap().as_str(), "https://www.apple.com/iphone/");
/// ```
#[must_use]
pub fn resolve_result_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;

    if let Some((_, target)) = resolved.query_pairs().find(|(k, _)| k == "uddg") {
        return parse_url(&target);
    }

    parse_url(resolved.as_str())
}

/// Build a "<host> <path>" display label, as printed on result pages.
#[must_use]
pub fn display_label(url: &Url) -> String {
    let host = extract_host(url).unwrap_or_default();
    match url.path() {
        "/" | "" => host,
        path => format!("{host}{path}"),
    }
}
