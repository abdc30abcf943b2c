//! Extractive summarization: key points are sentences lifted from the digest.
//!
//! Deterministic and infallible. Sentences are ranked by how many distinct
//! query terms they contain; ties keep discovery order.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::options::Options;
use crate::query::Query;
use crate::result::{SearchDigest, StrategyUsed, Summary};
use crate::summarize::{GenerationOutcome, Summarizer};
use crate::text;

/// Sentences taken from any single piece.
pub const MAX_SENTENCES_PER_PIECE: usize = 2;

/// Key-point sentences must be longer than this many chars...
const MIN_SENTENCE_CHARS: usize = 10;
/// ...and shorter than this.
const MAX_SENTENCE_CHARS: usize = 200;

/// Pieces quoted directly when no sentence qualifies.
const DIRECT_QUOTE_PIECES: usize = 3;

/// Hosts named in the narrative before "and N more".
const NAMED_HOSTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractiveSummarizer {
    max_key_points: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

#[derive(Debug)]
struct Candidate<'a> {
    sentence: &'a str,
    overlap: usize,
    discovery_index: usize,
    position: usize,
}

impl ExtractiveSummarizer {
    #[must_use]
    pub fn new(max_key_points: usize) -> Self {
        Self { max_key_points }
    }

    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.max_key_points)
    }

    /// Summarize `digest` for `query`. An empty digest gets a templated
    /// response naming the query.
    #[must_use]
    pub fn summarize_digest(&self, query: &Query, digest: &SearchDigest) -> Summary {
        if digest.is_empty() {
            return empty_summary(query);
        }

        let terms = query.term_set();
        let sentences: Vec<Vec<String>> = digest
            .pieces()
            .map(|piece| text::split_sentences(&piece.text))
            .collect();

        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        for (piece, piece_sentences) in digest.pieces().zip(&sentences) {
            let mut scored: Vec<Candidate<'_>> = piece_sentences
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    let len = s.chars().count();
                    len > MIN_SENTENCE_CHARS && len < MAX_SENTENCE_CHARS
                })
                .map(|(position, sentence)| Candidate {
                    sentence,
                    overlap: overlap(sentence, &terms),
                    discovery_index: piece.discovery_index,
                    position,
                })
                .collect();
            scored.sort_by(|a, b| b.overlap.cmp(&a.overlap).then(a.position.cmp(&b.position)));
            scored.truncate(MAX_SENTENCES_PER_PIECE);
            candidates.extend(scored);
        }

        candidates.sort_by(|a, b| {
            b.overlap
                .cmp(&a.overlap)
                .then(a.discovery_index.cmp(&b.discovery_index))
                .then(a.position.cmp(&b.position))
        });

        let mut seen = HashSet::new();
        let mut key_points: Vec<String> = candidates
            .into_iter()
            .filter(|c| seen.insert(c.sentence))
            .take(self.max_key_points)
            .map(|c| c.sentence.to_string())
            .collect();

        if key_points.is_empty() {
            key_points = digest
                .pieces()
                .take(DIRECT_QUOTE_PIECES.min(self.max_key_points))
                .map(|p| quote(&p.text))
                .collect();
        }

        let mut narrative = format!(
            "Here's information about {} from {}.",
            query.as_str(),
            source_phrase(digest)
        );
        if let Some(first) = key_points.first() {
            narrative.push(' ');
            narrative.push_str(first);
        }

        Summary {
            narrative,
            key_points,
            keywords: digest.keywords.clone(),
            strategy_used: StrategyUsed::Extractive,
        }
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, query: &Query, digest: &SearchDigest) -> GenerationOutcome {
        GenerationOutcome::Ok(self.summarize_digest(query, digest))
    }
}

fn overlap(sentence: &str, terms: &HashSet<&str>) -> usize {
    text::stemmed_tokens(sentence)
        .iter()
        .filter(|t| terms.contains(t.as_str()))
        .collect::<HashSet<_>>()
        .len()
}

fn quote(passage: &str) -> String {
    let cut = text::truncate_chars(passage, MAX_SENTENCE_CHARS);
    if cut.len() < passage.len() {
        format!("{}...", cut.trim_end())
    } else {
        cut.to_string()
    }
}

fn source_phrase(digest: &SearchDigest) -> String {
    let hosts: Vec<&str> = digest.hosts().collect();
    match hosts.len() {
        0 => "the search results".to_string(),
        1 => hosts[0].to_string(),
        n if n <= NAMED_HOSTS => {
            format!("{} and {}", hosts[..n - 1].join(", "), hosts[n - 1])
        }
        n => format!("{} and {} more", hosts[..NAMED_HOSTS].join(", "), n - NAMED_HOSTS),
    }
}

fn empty_summary(query: &Query) -> Summary {
    let q = query.as_str();
    Summary {
        narrative: format!(
            "No relevant content was found for \"{q}\". Try adding more details to your search, or search for related terms."
        ),
        key_points: vec![
            format!("{q} is a search term that might refer to various topics."),
            "To get more specific results, try adding more details to your search.".to_string(),
            "You can also try searching for related terms to find what you're looking for."
                .to_string(),
        ],
        keywords: Vec::new(),
        strategy_used: StrategyUsed::Extractive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{ContentPiece, HostGroup};

    fn digest(pieces: &[(&str, &str, usize)]) -> SearchDigest {
        let mut groups: Vec<HostGroup> = Vec::new();
        for (host, text, index) in pieces {
            let piece = ContentPiece {
                text: (*text).to_string(),
                source_host: (*host).to_string(),
                relevance_score: 1.0,
                discovery_index: *index,
            };
            match groups.iter_mut().find(|g| g.host == *host) {
                Some(group) => group.pieces.push(piece),
                None => groups.push(HostGroup {
                    host: (*host).to_string(),
                    trust_weight: 1.0,
                    average_score: 1.0,
                    rank_score: 1.0,
                    pieces: vec![piece],
                    keywords: vec![],
                }),
            }
        }
        SearchDigest {
            groups,
            keywords: vec!["battery".into()],
        }
    }

    #[test]
    fn test_empty_digest_gets_templated_summary_with_query() {
        let query = Query::parse("quantum toaster").unwrap();
        let summary = ExtractiveSummarizer::default().summarize_digest(&query, &SearchDigest::default());
        assert_eq!(summary.strategy_used, StrategyUsed::Extractive);
        assert!(summary.narrative.contains("quantum toaster"));
        assert!(summary.key_points[0].contains("quantum toaster"));
    }

    #[test]
    fn test_sentences_ranked_by_query_overlap() {
        let query = Query::parse("battery life").unwrap();
        let d = digest(&[
            ("a.com", "The screen is bright and sharp. Battery life reaches two days.", 0),
            ("b.com", "Charging is quick with the cable. The battery is large too.", 1),
        ]);
        let summary = ExtractiveSummarizer::new(3).summarize_digest(&query, &d);
        assert_eq!(
            summary.key_points,
            vec![
                "Battery life reaches two days.",
                "The battery is large too.",
                "The screen is bright and sharp.",
            ]
        );
        assert!(summary.narrative.starts_with("Here's information about battery life from a.com and b.com."));
        assert_eq!(summary.keywords, vec!["battery"]);
    }

    #[test]
    fn test_at_most_two_sentences_per_piece() {
        let query = Query::parse("battery").unwrap();
        let d = digest(&[(
            "a.com",
            "Battery one is good. Battery two is good. Battery three is good.",
            0,
        )]);
        let summary = ExtractiveSummarizer::new(5).summarize_digest(&query, &d);
        assert_eq!(summary.key_points.len(), 2);
    }

    #[test]
    fn test_long_passages_are_quoted_directly() {
        let query = Query::parse("battery").unwrap();
        let long = "word ".repeat(60);
        let d = digest(&[("a.com", long.trim(), 0)]);
        let summary = ExtractiveSummarizer::default().summarize_digest(&query, &d);
        assert_eq!(summary.key_points.len(), 1);
        assert!(summary.key_points[0].ends_with("..."));
    }

    #[test]
    fn test_source_phrase_names_first_hosts() {
        let d = digest(&[
            ("a.com", "x", 0),
            ("b.com", "x", 1),
            ("c.com", "x", 2),
            ("d.com", "x", 3),
        ]);
        assert_eq!(source_phrase(&d), "a.com, b.com, c.com and 1 more");
    }
}
