//! Relevance scoring for passages that passed the quality gate.
//!
//! A passage's relevance combines three components in `[0, 1]`:
//! 1. density: share of the passage's stemmed content tokens that are query terms
//! 2. length: token count against a 100-token target, damped for long text
//! 3. information: numeric literals and reasoning connectives
//!
//! The weighted sum is multiplied by the source host's trust weight.

use std::collections::HashSet;

use crate::lexicon;
use crate::options::ScoringWeights;
use crate::patterns::NUMERIC_LITERAL;
use crate::query::Query;
use crate::text;
use crate::trust::DomainTrustTable;

/// Token count at which the length score saturates.
const LENGTH_TARGET_TOKENS: f64 = 100.0;
/// Scale applied to the share of numeric words.
const NUMERIC_WEIGHT: f64 = 5.0;
/// Contribution of each distinct connective found.
const CONNECTIVE_WEIGHT: f64 = 0.2;

/// Breakdown of one passage's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassageScore {
    /// Share of tokens matching a query term.
    pub density: f64,
    /// Length component.
    pub length: f64,
    /// Information-density component.
    pub information: f64,
    /// Weighted sum of the three components, bounded to `[0, 1]`.
    pub relevance: f64,
    /// Trust weight of the source host.
    pub trust_weight: f64,
    /// `relevance * trust_weight`.
    pub final_score: f64,
}

/// Scores passages against one query.
///
/// # Example
///
/// ```
/// use search_digest::{DomainTrustTable, Query};
/// use search_digest::options::ScoringWeights;
/// use search_digest::scoring::RelevanceScorer;
///
/// let query = Query::parse("battery life").unwrap();
/// let scorer = RelevanceScorer::new(&query, ScoringWeights::default(), DomainTrustTable::builtin());
///
/// let score = scorer.score("Battery life improved by 20 percent in tests.", "en.wikipedia.org");
/// assert!(score.final_score > score.relevance);
/// assert!(scorer.is_relevant(&score));
/// ```
#[derive(Debug, Clone)]
pub struct RelevanceScorer<'a> {
    terms: HashSet<String>,
    weights: ScoringWeights,
    trust: &'a DomainTrustTable,
}

impl<'a> RelevanceScorer<'a> {
    #[must_use]
    pub fn new(query: &Query, weights: ScoringWeights, trust: &'a DomainTrustTable) -> Self {
        Self {
            terms: query.terms().iter().cloned().collect(),
            weights,
            trust,
        }
    }

    /// Score `passage` as found on `host`.
    #[must_use]
    pub fn score(&self, passage: &str, host: &str) -> PassageScore {
        let tokens = text::stemmed_tokens(passage);
        let density = density(&tokens, &self.terms);
        let length = length_score(tokens.len(), passage.chars().count(), &self.weights);
        let information = information_score(passage);

        let relevance = (self.weights.density * density
            + self.weights.length * length
            + self.weights.information * information)
            .clamp(0.0, 1.0);
        let trust_weight = self.trust.weight(host);

        PassageScore {
            density,
            length,
            information,
            relevance,
            trust_weight,
            final_score: relevance * trust_weight,
        }
    }

    /// Whether a score clears the relevance floor.
    #[must_use]
    pub fn is_relevant(&self, score: &PassageScore) -> bool {
        score.final_score > self.weights.min_relevance
    }
}

/// Share of `tokens` that are in `terms`. Zero for an empty passage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(tokens: &[String], terms: &HashSet<String>) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let matching = tokens.iter().filter(|t| terms.contains(*t)).count();
    matching as f64 / tokens.len() as f64
}

/// `min(1, tokens / 100)`, times the long-text penalty above the char threshold.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn length_score(token_count: usize, char_count: usize, weights: &ScoringWeights) -> f64 {
    let base = (token_count as f64 / LENGTH_TARGET_TOKENS).min(1.0);
    if char_count > weights.long_text_chars {
        base * weights.long_text_penalty
    } else {
        base
    }
}

/// `min(1, numeric_density * 5 + 0.2 * connectives)`.
///
/// Numeric density is the share of whitespace-separated words that are
/// numeric literals. Each distinct connective phrase counts once.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn information_score(passage: &str) -> f64 {
    let word_count = passage.split_whitespace().count();
    if word_count == 0 {
        return 0.0;
    }
    let numeric = NUMERIC_LITERAL.find_iter(passage).count() as f64 / word_count as f64;

    let padded = format!(" {} ", normalized_words(passage));
    let connectives = lexicon::connectives()
        .filter(|c| padded.contains(&format!(" {c} ")))
        .count() as f64;

    (numeric * NUMERIC_WEIGHT + connectives * CONNECTIVE_WEIGHT).min(1.0)
}

/// Lowercase words joined by single spaces, punctuation removed.
fn normalized_words(passage: &str) -> String {
    passage
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
