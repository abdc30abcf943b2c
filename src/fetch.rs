//! Page fetching.
//!
//! [`PageFetcher::fetch_all`] retrieves a bounded batch of candidate links
//! concurrently. Each request has its own timeout and its own failure: one
//! slow or broken page never affects the others.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;

use crate::encoding::decode_body;
use crate::error::Result;
use crate::options::Options;
use crate::search::duckduckgo::build_client;
use crate::search::CandidateLink;

/// A successful HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// An HTML response with a UTF-8 body.
    #[must_use]
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.into().into_bytes(),
        }
    }
}

/// Why one page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("not an HTML page: {0}")]
    UnsupportedContent(String),
}

/// Something that can retrieve a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url`. Non-2xx responses are failures.
    async fn get(&self, url: &Url) -> std::result::Result<RawResponse, FetchFailure>;
}

/// [`PageSource`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Build a source with the configured user agent and fetch timeout.
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self {
            client: build_client(&options.user_agent, options.fetch_timeout)?,
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn get(&self, url: &Url) -> std::result::Result<RawResponse, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        Ok(RawResponse {
            content_type,
            body: body.to_vec(),
        })
    }
}

/// One fetch attempt. `fetch_error` marks a soft failure: the page is
/// skipped downstream but the batch carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: Url,
    pub host: String,
    /// Decoded HTML; empty when the fetch failed.
    pub raw_html: String,
    pub fetch_error: Option<FetchFailure>,
}

impl FetchedPage {
    /// Whether the page was retrieved.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.fetch_error.is_none()
    }

    fn failed(link: &CandidateLink, error: FetchFailure) -> Self {
        Self {
            url: link.url.clone(),
            host: link.host.clone(),
            raw_html: String::new(),
            fetch_error: Some(error),
        }
    }
}

/// Concurrent, individually time-bounded fetching of candidate links.
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn PageSource>,
    timeout: Duration,
    max_fetch: usize,
}

impl PageFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>, timeout: Duration, max_fetch: usize) -> Self {
        Self {
            source,
            timeout,
            max_fetch,
        }
    }

    /// Fetch up to `max_fetch` links. Output order equals input order.
    pub async fn fetch_all(&self, links: &[CandidateLink]) -> Vec<FetchedPage> {
        let batch = &links[..links.len().min(self.max_fetch)];
        let fetches = batch.iter().map(|link| self.fetch_one(link));
        join_all(fetches).await
    }

    async fn fetch_one(&self, link: &CandidateLink) -> FetchedPage {
        debug!(url = %link.url, "fetching page");
        let outcome = tokio::time::timeout(self.timeout, self.source.get(&link.url)).await;

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                warn!(url = %link.url, error = %error, "page fetch failed");
                return FetchedPage::failed(link, error);
            }
            Err(_) => {
                warn!(url = %link.url, timeout = ?self.timeout, "page fetch timed out");
                return FetchedPage::failed(link, FetchFailure::Timeout(self.timeout));
            }
        };

        if let Some(content_type) = response.content_type.as_deref() {
            if !is_html_content_type(content_type) {
                warn!(url = %link.url, content_type, "skipping non-HTML page");
                return FetchedPage::failed(
                    link,
                    FetchFailure::UnsupportedContent(content_type.to_string()),
                );
            }
        }

        FetchedPage {
            url: link.url.clone(),
            host: link.host.clone(),
            raw_html: decode_body(&response.body, response.content_type.as_deref()),
            fetch_error: None,
        }
    }
}

/// Whether a `Content-Type` value can hold an HTML document.
#[must_use]
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml" || mime == "text/plain"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPageSource;

    fn link(url: &str, rank: usize) -> CandidateLink {
        let url = Url::parse(url).unwrap();
        let host = crate::url_utils::extract_host(&url).unwrap();
        CandidateLink { url, host, rank }
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type("application/pdf"));
        assert!(!is_html_content_type("image/png"));
    }

    #[tokio::test]
    async fn test_failures_are_isolated_and_order_is_kept() {
        let source = MockPageSource::new()
            .with_page("https://a.com/", "<p>a</p>")
            .with_failure("https://b.com/", FetchFailure::Status(503))
            .with_page("https://c.com/", "<p>c</p>");
        let fetcher = PageFetcher::new(Arc::new(source.clone()), Duration::from_secs(1), 5);

        let links = [
            link("https://a.com/", 0),
            link("https://b.com/", 1),
            link("https://c.com/", 2),
        ];
        let pages = fetcher.fetch_all(&links).await;

        let hosts: Vec<_> = pages.iter().map(|p| p.host.as_str()).collect();
        assert_eq!(hosts, vec!["a.com", "b.com", "c.com"]);
        assert!(pages[0].is_ok());
        assert_eq!(pages[1].fetch_error, Some(FetchFailure::Status(503)));
        assert_eq!(pages[2].raw_html, "<p>c</p>");
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_slow_page_times_out_alone() {
        let source = MockPageSource::new()
            .with_page("https://fast.com/", "<p>fast</p>")
            .with_page("https://slow.com/", "<p>slow</p>")
            .with_delay("https://slow.com/", Duration::from_secs(5));
        let fetcher = PageFetcher::new(Arc::new(source), Duration::from_millis(50), 5);

        let pages = fetcher
            .fetch_all(&[link("https://slow.com/", 0), link("https://fast.com/", 1)])
            .await;
        assert!(matches!(pages[0].fetch_error, Some(FetchFailure::Timeout(_))));
        assert!(pages[1].is_ok());
    }

    #[tokio::test]
    async fn test_batch_is_capped() {
        let source = MockPageSource::new();
        let fetcher = PageFetcher::new(Arc::new(source.clone()), Duration::from_secs(1), 2);
        let links: Vec<_> = (0..4).map(|i| link(&format!("https://h{i}.com/"), i)).collect();
        assert_eq!(fetcher.fetch_all(&links).await.len(), 2);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_html_is_a_soft_failure() {
        let source = MockPageSource::new().with_response(
            "https://a.com/doc.pdf",
            RawResponse {
                content_type: Some("application/pdf".into()),
                body: b"%PDF".to_vec(),
            },
        );
        let fetcher = PageFetcher::new(Arc::new(source), Duration::from_secs(1), 5);
        let pages = fetcher.fetch_all(&[link("https://a.com/doc.pdf", 0)]).await;
        assert!(matches!(
            pages[0].fetch_error,
            Some(FetchFailure::UnsupportedContent(_))
        ));
    }
}
