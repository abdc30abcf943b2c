//! Summarization strategies.
//!
//! Two strategies sit behind the [`Summarizer`] contract: a best-effort
//! generative one backed by a local model ([`GenerativeSummarizer`]) and a
//! deterministic extractive one that never fails ([`ExtractiveSummarizer`]).
//! [`summarize_with_fallback`] tries the former and falls back to the latter
//! exactly once.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::query::Query;
use crate::result::{SearchDigest, Summary};

pub mod extractive;
pub mod generative;

pub use extractive::ExtractiveSummarizer;
pub use generative::{
    GenerationError, GenerativeSummarizer, Generator, LlamaCliLoader, ModelLoader,
};

/// Result of one summarization attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A summary was produced.
    Ok(Summary),
    /// The strategy cannot run (no model, no runner).
    Unavailable,
    /// Generation exceeded its time bound and was abandoned.
    TimedOut,
    /// Generation ran but failed or produced nothing usable.
    Failed(String),
}

impl GenerationOutcome {
    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Unavailable => "unavailable",
            Self::TimedOut => "timed_out",
            Self::Failed(_) => "failed",
        }
    }
}

/// Produces a [`Summary`] of a digest for a query.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, query: &Query, digest: &SearchDigest) -> GenerationOutcome;
}

/// Try `primary` (when given); on anything but success, run `fallback`.
///
/// The returned summary's `strategy_used` always names the strategy that
/// produced its narrative.
pub async fn summarize_with_fallback(
    primary: Option<&dyn Summarizer>,
    fallback: &ExtractiveSummarizer,
    query: &Query,
    digest: &SearchDigest,
) -> Summary {
    if let Some(primary) = primary {
        match primary.summarize(query, digest).await {
            GenerationOutcome::Ok(summary) => {
                info!(strategy = ?summary.strategy_used, "summary generated");
                return summary;
            }
            GenerationOutcome::Failed(reason) => {
                warn!(reason = %reason, "generative summary failed, using extractive");
            }
            other => {
                warn!(outcome = other.kind(), "generative summary not produced, using extractive");
            }
        }
    }
    fallback.summarize_digest(query, digest)
}
