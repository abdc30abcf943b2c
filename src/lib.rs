//! # search-digest
//!
//! Query-driven web search digests.
//!
//! A free-text query is sent to a public search engine, the top result pages
//! are fetched in parallel, page chrome is stripped, and the remaining
//! passages are gated for quality and scored for relevance and source trust.
//! The best passages are grouped per host into a [`SearchDigest`] and
//! summarized, by a local generative model when one is available and
//! extractively otherwise.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use search_digest::{Options, Pipeline};
//!
//! # async fn demo() -> search_digest::Result<()> {
//! let pipeline = Pipeline::from_options(Options::default())?;
//! let digest = pipeline.run("rust async runtime comparison").await?;
//!
//! println!("{}", digest.summary.narrative);
//! for group in &digest.search_digest.groups {
//!     println!("{} ({} passages)", group.host, group.pieces.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Offline building blocks
//!
//! Extraction, gating and scoring are pure and usable on their own:
//!
//! ```rust
//! use search_digest::{extract_passages, DomainTrustTable, QualityGate, Query, RelevanceScorer};
//! use search_digest::options::ScoringWeights;
//!
//! let html = r#"<html><body><nav>Home | Login</nav><article>
//!     <p>Rust's ownership model prevents data races at compile time, because aliasing and mutation never coexist.</p>
//! </article></body></html>"#;
//!
//! let query = Query::parse("rust data races").unwrap();
//! let scorer = RelevanceScorer::new(&query, ScoringWeights::default(), DomainTrustTable::builtin());
//! let gate = QualityGate::default();
//!
//! for passage in extract_passages(html) {
//!     if gate.passes(&passage) {
//!         let score = scorer.score(&passage, "doc.rust-lang.org");
//!         assert!(score.final_score > 0.0);
//!     }
//! }
//! ```

mod error;
mod extract;
mod patterns;
mod result;

/// Configuration for a digest run.
pub mod options;

/// The validated user query.
pub mod query;

/// Static stop-word, denylist, connective and domain tables.
pub mod lexicon;

/// Hostname to trust-weight lookup.
pub mod trust;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Noise and content selector rules.
pub mod selector;

/// URL validation, host normalization and redirect unwrapping.
pub mod url_utils;

/// Character encoding detection and transcoding of page bodies.
pub mod encoding;

/// Passage cleaning, tokenizing, stemming and sentence splitting.
pub mod text;

/// Search-engine client.
pub mod search;

/// Concurrent page fetching.
pub mod fetch;

/// Passage quality gate.
pub mod quality;

/// Relevance scoring.
pub mod scoring;

/// Per-host aggregation into a search digest.
pub mod aggregate;

/// Generative and extractive summarization.
pub mod summarize;

/// HTML and plain-text rendering.
pub mod format;

/// End-to-end orchestration.
pub mod pipeline;

/// Mock collaborators for tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Public API - re-exports
pub use aggregate::{aggregate, AggregateLimits};
pub use error::{Error, Result};
pub use extract::extract_passages;
pub use fetch::{FetchFailure, FetchedPage, PageFetcher, PageSource};
pub use options::{Options, QueryWidening, ScoringWeights};
pub use pipeline::Pipeline;
pub use quality::{QualityGate, Rejection};
pub use query::Query;
pub use result::{ContentPiece, Digest, HostGroup, SearchDigest, StrategyUsed, Summary};
pub use scoring::{PassageScore, RelevanceScorer};
pub use search::{CandidateLink, SearchEngine};
pub use summarize::{ExtractiveSummarizer, GenerationOutcome, GenerativeSummarizer, Summarizer};
pub use trust::DomainTrustTable;
