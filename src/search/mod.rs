//! Search-engine client.
//!
//! A [`SearchEngine`] turns a [`Query`] into a short, ranked list of
//! [`CandidateLink`]s. The shipped implementation scrapes the DuckDuckGo HTML
//! endpoint ([`DuckDuckGo`]); tests substitute their own engine.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::lexicon::domains::{DENIED_DOMAINS, DENIED_PATH_SEGMENTS, TECH_KEYWORDS, TECH_SITES};
use crate::options::QueryWidening;
use crate::query::Query;
use crate::text;
use crate::url_utils::{display_label, extract_host, host_matches_suffix, normalize_url};

pub mod duckduckgo;

pub use duckduckgo::{parse_results, DuckDuckGo};

/// A search result not yet fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Absolute http(s) target.
    pub url: Url,
    /// Normalized host of `url`.
    pub host: String,
    /// 0-based position on the results page.
    pub rank: usize,
}

impl fmt::Display for CandidateLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.rank, display_label(&self.url))
    }
}

/// Source of candidate links for a query.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Search for `query`.
    ///
    /// Fails with `NoResultsFound` when no link survives filtering and with
    /// `UpstreamUnavailable` when the engine cannot be reached or its page
    /// cannot be understood.
    async fn search(&self, query: &Query) -> Result<Vec<CandidateLink>>;
}

/// Whether `url` points at a denied host or a non-content page.
#[must_use]
pub fn is_denied(url: &Url) -> bool {
    let Some(host) = extract_host(url) else {
        return true;
    };
    if DENIED_DOMAINS.iter().any(|d| host_matches_suffix(&host, d)) {
        return true;
    }
    url.path()
        .split('/')
        .map(normalize_segment)
        .any(|segment| DENIED_PATH_SEGMENTS.contains(&segment.as_str()))
}

/// Lowercase a path segment, drop its extension and read `_` as `-`.
fn normalize_segment(segment: &str) -> String {
    let stem = segment.rsplit_once('.').map_or(segment, |(stem, _)| stem);
    stem.to_ascii_lowercase().replace('_', "-")
}

/// Turn result URLs, in page order, into candidate links.
///
/// Denied URLs are dropped, duplicates keep their first occurrence, and
/// each link keeps its position on the page as `rank`.
#[must_use]
pub fn to_candidates(urls: impl IntoIterator<Item = Url>) -> Vec<CandidateLink> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .enumerate()
        .filter(|(_, url)| !is_denied(url))
        .filter(|(_, url)| seen.insert(normalize_url(url)))
        .filter_map(|(rank, url)| {
            let host = extract_host(&url)?;
            Some(CandidateLink { url, host, rank })
        })
        .collect()
}

/// The query string actually sent to the engine.
///
/// With [`QueryWidening::TechSites`], a query mentioning a technical keyword
/// is restricted to a fixed set of technical sites.
///
/// ```
/// use search_digest::options::QueryWidening;
/// use search_digest::search::widen_query;
/// use search_digest::Query;
///
/// let query = Query::parse("linux kernel scheduler").unwrap();
/// assert_eq!(widen_query(&query, QueryWidening::None), "linux kernel scheduler");
/// assert!(widen_query(&query, QueryWidening::TechSites).contains("site:github.com"));
/// ```
#[must_use]
pub fn widen_query(query: &Query, widening: QueryWidening) -> String {
    match widening {
        QueryWidening::None => query.as_str().to_string(),
        QueryWidening::TechSites => {
            let topical = text::raw_tokens(query.as_str())
                .iter()
                .any(|t| TECH_KEYWORDS.contains(&t.as_str()));
            if !topical {
                return query.as_str().to_string();
            }
            let sites = TECH_SITES
                .iter()
                .map(|s| format!("site:{s}"))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("{} ({sites})", query.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_denylist() {
        assert!(is_denied(&url("https://www.facebook.com/apple")));
        assert!(is_denied(&url("https://m.youtube.com/watch?v=1")));
        assert!(is_denied(&url("https://example.com/account/login")));
        assert!(is_denied(&url("https://example.com/privacy-policy")));
        assert!(!is_denied(&url("https://www.apple.com/iphone/")));
        assert!(!is_denied(&url("https://notfacebook.com/page")));
    }

    #[test]
    fn test_denylist_matches_whole_segments_only() {
        assert!(is_denied(&url("https://example.com/Login.php")));
        assert!(is_denied(&url("https://example.com/help/terms_of_service/")));
        assert!(is_denied(&url("https://shop.example.com/cart?id=3")));

        assert!(!is_denied(&url("https://en.wikipedia.org/wiki/Accounting")));
        assert!(!is_denied(&url("https://en.wikipedia.org/wiki/Legal_drinking_age")));
        assert!(!is_denied(&url("https://www.britannica.com/topic/terms-of-trade")));
        assert!(!is_denied(&url(
            "https://www.theregister.com/2024/05/01/registered_voters/"
        )));
        assert!(!is_denied(&url("https://example.com/cartography/maps")));
    }

    #[test]
    fn test_candidates_keep_page_rank_and_drop_duplicates() {
        let links = to_candidates([
            url("https://a.com/x"),
            url("https://twitter.com/a"),
            url("https://b.com/y"),
            url("https://a.com/x/#top"),
        ]);
        let summary: Vec<_> = links.iter().map(|l| (l.host.as_str(), l.rank)).collect();
        assert_eq!(summary, vec![("a.com", 0), ("b.com", 2)]);
    }

    #[test]
    fn test_widening_only_for_topical_queries() {
        let plain = Query::parse("best pasta recipe").unwrap();
        assert_eq!(widen_query(&plain, QueryWidening::TechSites), "best pasta recipe");

        let tech = Query::parse("iPhone battery").unwrap();
        let widened = widen_query(&tech, QueryWidening::TechSites);
        assert!(widened.starts_with("iPhone battery ("));
        assert!(widened.contains(" OR site:"));
        assert!(widened.ends_with(')'));
    }

    #[test]
    fn test_candidate_display() {
        let link = CandidateLink {
            url: url("https://www.apple.com/iphone"),
            host: "apple.com".into(),
            rank: 3,
        };
        assert_eq!(link.to_string(), "#3 apple.com/iphone");
    }
}
