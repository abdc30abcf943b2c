//! Test doubles for the pipeline's collaborators.
//!
//! Each mock counts its calls so tests can assert, for example, that an
//! invalid query never reaches the network. Clones share their counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::{FetchFailure, PageSource, RawResponse};
use crate::query::Query;
use crate::search::{to_candidates, CandidateLink, SearchEngine};
use crate::summarize::{GenerationError, Generator, ModelLoader};

fn url_key(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_string(), |u| u.to_string())
}

#[derive(Debug, Clone)]
enum SearchReply {
    Links(Vec<CandidateLink>),
    NoResults,
    Unavailable(String),
}

/// A [`SearchEngine`] with a canned reply.
#[derive(Debug, Clone)]
pub struct MockSearchEngine {
    reply: SearchReply,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockSearchEngine {
    /// Replies with `urls` as candidates, after the usual denylist and
    /// de-duplication. Unparsable URLs are skipped.
    #[must_use]
    pub fn with_links(urls: &[&str]) -> Self {
        let parsed = urls.iter().filter_map(|u| Url::parse(u).ok());
        Self::new(SearchReply::Links(to_candidates(parsed)))
    }

    /// Fails with `NoResultsFound`.
    #[must_use]
    pub fn no_results() -> Self {
        Self::new(SearchReply::NoResults)
    }

    /// Fails with `UpstreamUnavailable`.
    #[must_use]
    pub fn unavailable(reason: &str) -> Self {
        Self::new(SearchReply::Unavailable(reason.to_string()))
    }

    fn new(reply: SearchReply) -> Self {
        Self {
            reply,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait `delay` before replying.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of searches made.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchEngine for MockSearchEngine {
    async fn search(&self, _query: &Query) -> Result<Vec<CandidateLink>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            SearchReply::Links(links) if !links.is_empty() => Ok(links.clone()),
            SearchReply::Links(_) | SearchReply::NoResults => Err(Error::NoResultsFound),
            SearchReply::Unavailable(reason) => Err(Error::UpstreamUnavailable(reason.clone())),
        }
    }
}

/// A [`PageSource`] serving canned pages. Unknown URLs answer HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct MockPageSource {
    pages: HashMap<String, std::result::Result<RawResponse, FetchFailure>>,
    delays: HashMap<String, Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockPageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`.
    #[must_use]
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.with_response(url, RawResponse::html(html))
    }

    /// Serve `response` at `url`.
    #[must_use]
    pub fn with_response(mut self, url: &str, response: RawResponse) -> Self {
        self.pages.insert(url_key(url), Ok(response));
        self
    }

    /// Fail requests for `url`.
    #[must_use]
    pub fn with_failure(mut self, url: &str, failure: FetchFailure) -> Self {
        self.pages.insert(url_key(url), Err(failure));
        self
    }

    /// Wait `delay` before answering `url`.
    #[must_use]
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url_key(url), delay);
        self
    }

    /// Number of requests made.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn get(&self, url: &Url) -> std::result::Result<RawResponse, FetchFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = url.to_string();
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        self.pages
            .get(&key)
            .cloned()
            .unwrap_or(Err(FetchFailure::Status(404)))
    }
}

/// A [`Generator`] with a canned reply.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    reply: std::result::Result<String, GenerationError>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockGenerator {
    /// Replies with `text`.
    #[must_use]
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails every generation.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            reply: Err(GenerationError::Io("mock failure".to_string())),
            ..Self::replying("")
        }
    }

    /// Wait `delay` before replying.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of generations started.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: usize) -> std::result::Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}

/// A [`ModelLoader`] handing out a [`MockGenerator`], or failing when built
/// with [`MockModelLoader::unavailable`].
#[derive(Debug, Clone)]
pub struct MockModelLoader {
    generator: Option<MockGenerator>,
    loads: Arc<AtomicUsize>,
}

impl MockModelLoader {
    #[must_use]
    pub fn new(generator: MockGenerator) -> Self {
        Self {
            generator: Some(generator),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every load fails as if the model file were missing.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            generator: None,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of loads attempted.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for MockModelLoader {
    async fn load(&self) -> std::result::Result<Arc<dyn Generator>, GenerationError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        // Give concurrent callers a chance to pile up on the same load.
        tokio::task::yield_now().await;
        match &self.generator {
            Some(generator) => Ok(Arc::new(generator.clone())),
            None => Err(GenerationError::ModelMissing("mock.gguf".into())),
        }
    }
}
