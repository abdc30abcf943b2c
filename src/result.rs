//! Result types for a digest run.
//!
//! Scored passages ([`ContentPiece`]) are grouped per host into a
//! [`SearchDigest`], summarized into a [`Summary`], and returned together as
//! a [`Digest`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format;

/// A passage that passed the quality gate and the relevance floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPiece {
    /// Cleaned passage text.
    pub text: String,

    /// Normalized host of the page the passage came from.
    pub source_host: String,

    /// Trust-weighted relevance score.
    pub relevance_score: f64,

    /// Position in the order passages were discovered across all pages.
    ///
    /// Breaks score ties so output stays deterministic.
    pub discovery_index: usize,
}

/// The retained pieces of one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostGroup {
    /// Normalized host name.
    pub host: String,

    /// Trust weight of the host.
    pub trust_weight: f64,

    /// Mean score of the retained pieces.
    pub average_score: f64,

    /// `average_score * trust_weight`, used to rank hosts.
    pub rank_score: f64,

    /// Pieces sorted by score descending, at most the per-host cap.
    pub pieces: Vec<ContentPiece>,

    /// Keywords of this host's retained pieces, ranked by frequency.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Content grouped by source host, plus ranked keywords.
///
/// Built only by the aggregator and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDigest {
    /// Host groups, best ranked first.
    pub groups: Vec<HostGroup>,

    /// Keywords ranked by frequency across retained text.
    pub keywords: Vec<String>,
}

impl SearchDigest {
    /// Whether no content survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.pieces.is_empty())
    }

    /// Every retained piece, in group order.
    pub fn pieces(&self) -> impl Iterator<Item = &ContentPiece> {
        self.groups.iter().flat_map(|g| g.pieces.iter())
    }

    /// Host names in rank order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.host.as_str())
    }

    /// The group for `host`, if present.
    #[must_use]
    pub fn group(&self, host: &str) -> Option<&HostGroup> {
        self.groups.iter().find(|g| g.host == host)
    }
}

/// Which summarization path produced the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyUsed {
    Generative,
    Extractive,
}

impl StrategyUsed {
    /// Badge text shown with the rendered summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Generative => "AI summary",
            Self::Extractive => "Search results",
        }
    }
}

/// Narrative plus highlights for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub narrative: String,
    pub key_points: Vec<String>,
    pub keywords: Vec<String>,
    pub strategy_used: StrategyUsed,
}

/// Final output of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    /// The trimmed query text.
    pub query: String,
    pub search_digest: SearchDigest,
    pub summary: Summary,
    pub generated_at: DateTime<Utc>,
}

impl Digest {
    /// Render as a self-contained HTML fragment.
    #[must_use]
    pub fn render_html(&self) -> String {
        format::render_html(self)
    }

    /// Render as plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        format::render_text(self)
    }
}
