//! DuckDuckGo HTML endpoint.
//!
//! The results page is plain server-rendered HTML, so no API key is needed.
//! Everything that depends on its markup lives in [`parse_results`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::dom;
use crate::error::{Error, Result};
use crate::options::{Options, QueryWidening};
use crate::query::Query;
use crate::search::{to_candidates, widen_query, CandidateLink, SearchEngine};
use crate::url_utils::resolve_result_href;

/// Results page endpoint.
pub const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Result containers, preferred first.
const RESULT_BODY_SELECTORS: &[&str] = &[".result__body", ".result"];
/// Result title links, preferred first.
const RESULT_LINK_SELECTORS: &[&str] = &["a.result__a", "a.result__url"];
/// Markers of a well-formed page that simply has no results.
const EMPTY_PAGE_MARKERS: &str = ".no-results, #links, .results";

/// Client for the DuckDuckGo HTML endpoint.
#[derive(Debug, Clone)]
pub struct DuckDuckGo {
    client: reqwest::Client,
    endpoint: Url,
    max_candidates: usize,
    widening: QueryWidening,
}

impl DuckDuckGo {
    /// Build a client from `options` (user agent, search timeout, widening,
    /// candidate cap).
    pub fn new(options: &Options) -> Result<Self> {
        let endpoint = Url::parse(ENDPOINT).map_err(|e| Error::Config(e.to_string()))?;
        Self::with_endpoint(options, endpoint)
    }

    /// Same as [`DuckDuckGo::new`] against a different results endpoint.
    pub fn with_endpoint(options: &Options, endpoint: Url) -> Result<Self> {
        let client = build_client(&options.user_agent, options.search_timeout)?;
        Ok(Self {
            client,
            endpoint,
            max_candidates: options.max_candidates,
            widening: options.query_widening,
        })
    }
}

pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
        .build()
        .map_err(|e| Error::Config(format!("HTTP client: {e}")))
}

#[async_trait]
impl SearchEngine for DuckDuckGo {
    async fn search(&self, query: &Query) -> Result<Vec<CandidateLink>> {
        let q = widen_query(query, self.widening);
        debug!(query = %q, endpoint = %self.endpoint, "searching");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", q.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "search request failed");
                Error::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!("search returned HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        let mut links = parse_results(&html, &self.endpoint)?;
        links.truncate(self.max_candidates);
        if links.is_empty() {
            return Err(Error::NoResultsFound);
        }
        debug!(count = links.len(), "search candidates");
        Ok(links)
    }
}

/// Parse a results page into filtered, de-duplicated candidate links.
///
/// Returns an empty list for a well-formed page without results, and
/// `UpstreamUnavailable` for a page that is not a results page at all (an
/// error or challenge page, for instance).
///
/// ```
/// use search_digest::search::parse_results;
///
/// let base = url::Url::parse("https://html.duckduckgo.com/html/").unwrap();
/// let html = r#"<div id="links">
///   <div class="result"><div class="result__body">
///     <a class="result__a" href="https://en.wikipedia.org/wiki/IPhone">iPhone</a>
///   </div></div>
/// </div>"#;
/// let links = parse_results(html, &base).unwrap();
/// assert_eq!(links[0].host, "en.wikipedia.org");
/// ```
pub fn parse_results(html: &str, base: &Url) -> Result<Vec<CandidateLink>> {
    let document = dom::parse(html);

    let Some(bodies) = RESULT_BODY_SELECTORS
        .iter()
        .map(|css| document.select(css))
        .find(dom::Selection::exists)
    else {
        if document.select(EMPTY_PAGE_MARKERS).exists() {
            return Ok(Vec::new());
        }
        return Err(Error::UpstreamUnavailable(
            "unrecognized search results page".to_string(),
        ));
    };

    let mut urls = Vec::new();
    for body in bodies.iter() {
        let href = RESULT_LINK_SELECTORS
            .iter()
            .map(|css| body.select(css))
            .find(dom::Selection::exists)
            .and_then(|link| dom::get_attribute(&link.first(), "href"));
        if let Some(url) = href.and_then(|h| resolve_result_href(&h, base)) {
            urls.push(url);
        }
    }

    Ok(to_candidates(urls))
}
