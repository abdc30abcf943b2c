//! Configuration options for a digest run.
//!
//! The `Options` struct controls every tunable of the pipeline: how many
//! links are fetched, how long each stage may take, how passages are scored
//! and capped, and where the optional local model lives.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Placeholder text the calling UI shows in an empty search box.
pub const PLACEHOLDER_QUERY: &str = "Search the Web";

/// Configuration options for a digest run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings. A partial JSON document can be loaded with
/// [`Options::from_json_str`]; missing fields keep their defaults and
/// durations are given in milliseconds.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use search_digest::Options;
///
/// let options = Options {
///     max_candidates: 3,
///     ai_timeout: Duration::from_secs(10),
///     ..Options::default()
/// };
/// assert_eq!(options.per_host_cap, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Maximum number of candidate links taken from the search engine and fetched.
    ///
    /// Default: `5`
    pub max_candidates: usize,

    /// Timeout for the search-engine request.
    ///
    /// Default: `10s`
    #[serde(with = "duration_ms")]
    pub search_timeout: Duration,

    /// Timeout for each individual page fetch.
    ///
    /// Default: `10s`
    #[serde(with = "duration_ms")]
    pub fetch_timeout: Duration,

    /// `User-Agent` header sent with every outbound request.
    pub user_agent: String,

    /// Strategy for widening topical queries with `site:` filters.
    ///
    /// Default: [`QueryWidening::None`]
    pub query_widening: QueryWidening,

    /// Minimum passage length in characters (inclusive).
    ///
    /// Default: `50`
    pub min_passage_chars: usize,

    /// Maximum passage length in characters (inclusive).
    ///
    /// Default: `1000`
    pub max_passage_chars: usize,

    /// Relevance scoring weights and floor.
    pub scoring: ScoringWeights,

    /// Pieces kept per source host.
    ///
    /// Default: `3`
    pub per_host_cap: usize,

    /// Source hosts kept in the digest.
    ///
    /// Default: `4`
    pub max_hosts: usize,

    /// Keywords kept in the digest.
    ///
    /// Default: `12`
    pub max_keywords: usize,

    /// Key points produced by the extractive summarizer.
    ///
    /// Default: `5`
    pub max_key_points: usize,

    /// Extra trust entries, merged over the built-in table.
    ///
    /// Weights are clamped to `[1.0, 5.0]`.
    pub trust_overrides: BTreeMap<String, f64>,

    /// Path to a local generative-model file (GGUF).
    ///
    /// `None` or a missing file makes the generative summarizer unavailable.
    ///
    /// Default: `None`
    pub model_path: Option<PathBuf>,

    /// Executable used to run the local model.
    ///
    /// Default: `"llama-cli"`
    pub model_runner: String,

    /// Wall-clock bound on one generation.
    ///
    /// Default: `30s`
    #[serde(with = "duration_ms")]
    pub ai_timeout: Duration,

    /// Maximum tokens requested from the model.
    ///
    /// Default: `800`
    pub max_generated_tokens: usize,

    /// Content pieces included in the generation prompt.
    ///
    /// Default: `5`
    pub prompt_piece_cap: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            search_timeout: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(10),
            user_agent: format!(
                "search-digest/{} (query digest bot; reqwest)",
                env!("CARGO_PKG_VERSION")
            ),
            query_widening: QueryWidening::None,
            min_passage_chars: 50,
            max_passage_chars: 1000,
            scoring: ScoringWeights::default(),
            per_host_cap: 3,
            max_hosts: 4,
            max_keywords: 12,
            max_key_points: 5,
            trust_overrides: BTreeMap::new(),
            model_path: None,
            model_runner: "llama-cli".to_string(),
            ai_timeout: Duration::from_secs(30),
            max_generated_tokens: 800,
            prompt_piece_cap: 5,
        }
    }
}

impl Options {
    /// Load options from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }
}

/// Weights combining the three relevance components, plus the discard floor.
///
/// These values were tuned against a small set of queries; treat them as
/// defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of query-token density. Default: `0.5`
    pub density: f64,
    /// Weight of the length score. Default: `0.2`
    pub length: f64,
    /// Weight of the information-density score. Default: `0.3`
    pub information: f64,
    /// Passages whose trust-weighted score is at or below this are dropped. Default: `0.3`
    pub min_relevance: f64,
    /// Passages longer than this many characters get `long_text_penalty`. Default: `500`
    pub long_text_chars: usize,
    /// Multiplier applied to the length score of long passages. Default: `0.8`
    pub long_text_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            density: 0.5,
            length: 0.2,
            information: 0.3,
            min_relevance: 0.3,
            long_text_chars: 500,
            long_text_penalty: 0.8,
        }
    }
}

/// How a topical query is widened before it is sent to the search engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryWidening {
    /// Send the query as typed.
    #[default]
    None,
    /// Append `site:` filters for a fixed list of technology sites when the
    /// query looks technical.
    TechSites,
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
