//! End-to-end orchestration of a digest run.
//!
//! query → search → fetch (parallel) → extract → gate and score → aggregate →
//! summarize → [`Digest`].

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, AggregateLimits};
use crate::error::{Error, Result};
use crate::extract::extract_passages;
use crate::fetch::{FetchedPage, HttpPageSource, PageFetcher, PageSource};
use crate::options::Options;
use crate::quality::QualityGate;
use crate::query::Query;
use crate::result::{ContentPiece, Digest};
use crate::scoring::RelevanceScorer;
use crate::search::duckduckgo::DuckDuckGo;
use crate::search::SearchEngine;
use crate::summarize::{summarize_with_fallback, ExtractiveSummarizer, GenerativeSummarizer, Summarizer};
use crate::trust::DomainTrustTable;

/// A configured digest pipeline.
///
/// Cheap to share behind an `Arc`; runs do not mutate it apart from the
/// generative summarizer's one-time model load.
///
/// # Example
///
/// ```no_run
/// use search_digest::{Options, Pipeline};
///
/// # async fn demo() -> search_digest::Result<()> {
/// let pipeline = Pipeline::from_options(Options::default())?;
/// let digest = pipeline.run("iphone 15 battery life").await?;
/// println!("{}", digest.render_text());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    engine: Arc<dyn SearchEngine>,
    fetcher: PageFetcher,
    trust: DomainTrustTable,
    gate: QualityGate,
    limits: AggregateLimits,
    generative: Option<Arc<dyn Summarizer>>,
    extractive: ExtractiveSummarizer,
    options: Options,
}

impl Pipeline {
    /// Pipeline over explicit collaborators, with no generative summarizer.
    #[must_use]
    pub fn new(options: Options, engine: Arc<dyn SearchEngine>, source: Arc<dyn PageSource>) -> Self {
        Self {
            engine,
            fetcher: PageFetcher::new(source, options.fetch_timeout, options.max_candidates),
            trust: DomainTrustTable::with_overrides(&options.trust_overrides),
            gate: QualityGate::from_options(&options),
            limits: AggregateLimits::from_options(&options),
            generative: None,
            extractive: ExtractiveSummarizer::from_options(&options),
            options,
        }
    }

    /// DuckDuckGo search, HTTP fetching and a `llama-cli` backed generative
    /// summarizer.
    pub fn from_options(options: Options) -> Result<Self> {
        let engine = Arc::new(DuckDuckGo::new(&options)?);
        let source = Arc::new(HttpPageSource::new(&options)?);
        let generative = Arc::new(GenerativeSummarizer::from_options(&options));
        Ok(Self::new(options, engine, source).with_summarizer(generative))
    }

    /// Try `summarizer` before the extractive fallback.
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.generative = Some(summarizer);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn trust(&self) -> &DomainTrustTable {
        &self.trust
    }

    /// Run to completion.
    pub async fn run(&self, raw_query: &str) -> Result<Digest> {
        self.run_with_cancel(raw_query, CancellationToken::new()).await
    }

    /// Run until done or until `token` is cancelled.
    ///
    /// The query is validated before anything touches the network. A
    /// cancelled run returns [`Error::Cancelled`] and discards partial work.
    pub async fn run_with_cancel(&self, raw_query: &str, token: CancellationToken) -> Result<Digest> {
        let query = Query::parse(raw_query)?;
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        info!(query = %query, "digest run started");

        let links = cancellable(&token, self.engine.search(&query)).await??;
        info!(candidates = links.len(), "search complete");

        let pages = cancellable(&token, self.fetcher.fetch_all(&links)).await?;
        let fetched = pages.iter().filter(|p| p.is_ok()).count();
        info!(fetched, attempted = pages.len(), "fetch complete");
        if fetched == 0 {
            return Err(Error::NoContentExtracted);
        }

        let pieces = self.score_pages(&query, &pages);
        if pieces.is_empty() {
            warn!(query = %query, "no passage qualified");
            return Err(Error::NoContentExtracted);
        }

        let search_digest = aggregate(&pieces, &self.trust, &self.limits);
        info!(
            pieces = pieces.len(),
            hosts = search_digest.groups.len(),
            "aggregation complete"
        );

        let summary = cancellable(
            &token,
            summarize_with_fallback(
                self.generative.as_deref(),
                &self.extractive,
                &query,
                &search_digest,
            ),
        )
        .await?;

        Ok(Digest {
            query: query.as_str().to_string(),
            search_digest,
            summary,
            generated_at: Utc::now(),
        })
    }

    /// Extract, gate and score every fetched page. Discovery indices follow
    /// page order, then passage order within a page.
    fn score_pages(&self, query: &Query, pages: &[FetchedPage]) -> Vec<ContentPiece> {
        let scorer = RelevanceScorer::new(query, self.options.scoring, &self.trust);
        let mut pieces = Vec::new();

        for page in pages.iter().filter(|p| p.is_ok()) {
            let passages = extract_passages(&page.raw_html);
            let before = pieces.len();
            for passage in passages {
                if !self.gate.passes(&passage) {
                    continue;
                }
                let score = scorer.score(&passage, &page.host);
                if !scorer.is_relevant(&score) {
                    continue;
                }
                pieces.push(ContentPiece {
                    text: passage,
                    source_host: page.host.clone(),
                    relevance_score: score.final_score,
                    discovery_index: pieces.len(),
                });
            }
            debug!(host = %page.host, kept = pieces.len() - before, "page scored");
        }
        pieces
    }
}

/// Race `fut` against `token`.
async fn cancellable<F: Future>(token: &CancellationToken, fut: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        () = token.cancelled() => {
            info!("digest run cancelled");
            Err(Error::Cancelled)
        }
        out = fut => Ok(out),
    }
}
