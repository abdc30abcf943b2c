//! Aggregation of scored pieces into a [`SearchDigest`].
//!
//! Deterministic and idempotent: aggregating a digest's own pieces again
//! yields the same digest.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::options::Options;
use crate::result::{ContentPiece, HostGroup, SearchDigest};
use crate::text;
use crate::trust::DomainTrustTable;

/// Caps applied during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateLimits {
    pub per_host_cap: usize,
    pub max_hosts: usize,
    pub max_keywords: usize,
}

impl AggregateLimits {
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            per_host_cap: options.per_host_cap,
            max_hosts: options.max_hosts,
            max_keywords: options.max_keywords,
        }
    }
}

impl Default for AggregateLimits {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

/// Group `pieces` by host, rank, cap, and derive keywords.
///
/// Within a host, pieces are ordered by score (descending) then discovery
/// index. Hosts are ranked by `average_score * trust_weight`; ties go to the
/// host whose retained pieces were discovered first.
#[must_use]
pub fn aggregate(
    pieces: &[ContentPiece],
    trust: &DomainTrustTable,
    limits: &AggregateLimits,
) -> SearchDigest {
    let mut order: Vec<&str> = Vec::new();
    let mut by_host: HashMap<&str, Vec<&ContentPiece>> = HashMap::new();
    for piece in pieces {
        let host = piece.source_host.as_str();
        by_host
            .entry(host)
            .or_insert_with(|| {
                order.push(host);
                Vec::new()
            })
            .push(piece);
    }

    let mut groups: Vec<HostGroup> = order
        .into_iter()
        .filter_map(|host| {
            let mut members = by_host.remove(host)?;
            members.sort_by(|a, b| by_score_then_discovery(a, b));
            members.truncate(limits.per_host_cap);
            if members.is_empty() {
                return None;
            }
            Some(host_group(host, &members, trust, limits.max_keywords))
        })
        .collect();

    groups.sort_by(|a, b| {
        b.rank_score
            .total_cmp(&a.rank_score)
            .then_with(|| first_discovery(a).cmp(&first_discovery(b)))
    });
    groups.truncate(limits.max_hosts);

    let keywords = rank_keywords(
        groups.iter().flat_map(|g| g.pieces.iter()),
        limits.max_keywords,
    );
    SearchDigest { groups, keywords }
}

fn by_score_then_discovery(a: &ContentPiece, b: &ContentPiece) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| a.discovery_index.cmp(&b.discovery_index))
}

fn first_discovery(group: &HostGroup) -> usize {
    group
        .pieces
        .iter()
        .map(|p| p.discovery_index)
        .min()
        .unwrap_or(usize::MAX)
}

#[allow(clippy::cast_precision_loss)]
fn host_group(
    host: &str,
    members: &[&ContentPiece],
    trust: &DomainTrustTable,
    max_keywords: usize,
) -> HostGroup {
    let trust_weight = trust.weight(host);
    let average_score =
        members.iter().map(|p| p.relevance_score).sum::<f64>() / members.len() as f64;
    HostGroup {
        host: host.to_string(),
        trust_weight,
        average_score,
        rank_score: average_score * trust_weight,
        pieces: members.iter().map(|p| (*p).clone()).collect(),
        keywords: rank_keywords(members.iter().copied(), max_keywords),
    }
}

/// Content tokens of `pieces` ranked by frequency, ties by first appearance.
/// Purely numeric tokens are skipped.
fn rank_keywords<'a>(
    pieces: impl Iterator<Item = &'a ContentPiece>,
    max_keywords: usize,
) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next = 0;
    for piece in pieces {
        for token in text::content_tokens(&piece.text) {
            if token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let entry = counts.entry(token).or_insert_with(|| {
                next += 1;
                (0, next)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then_with(|| fa.cmp(fb)));
    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(word, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(text: &str, host: &str, score: f64, index: usize) -> ContentPiece {
        ContentPiece {
            text: text.to_string(),
            source_host: host.to_string(),
            relevance_score: score,
            discovery_index: index,
        }
    }

    fn table() -> DomainTrustTable {
        DomainTrustTable::from_entries([("trusted.org", 3.0)])
    }

    #[test]
    fn test_per_host_cap_keeps_best_scores() {
        let pieces: Vec<_> = (0..5u8)
            .map(|i| piece("battery text", "a.com", f64::from(i), usize::from(i)))
            .collect();
        let digest = aggregate(&pieces, &table(), &AggregateLimits::default());
        let group = digest.group("a.com").unwrap();
        let kept: Vec<_> = group.pieces.iter().map(|p| p.discovery_index).collect();
        assert_eq!(kept, vec![4, 3, 2]);
        assert_eq!(group.average_score, 3.0);
    }

    #[test]
    fn test_score_ties_break_on_discovery_order() {
        let pieces = vec![
            piece("second", "a.com", 1.0, 7),
            piece("first", "a.com", 1.0, 2),
        ];
        let digest = aggregate(&pieces, &table(), &AggregateLimits::default());
        let texts: Vec<_> = digest.groups[0].pieces.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_hosts_ranked_by_average_times_trust_and_capped() {
        let pieces = vec![
            piece("x", "one.com", 1.0, 0),
            piece("x", "two.com", 1.5, 1),
            piece("x", "trusted.org", 0.8, 2),
            piece("x", "three.com", 0.5, 3),
            piece("x", "four.com", 0.4, 4),
        ];
        let digest = aggregate(&pieces, &table(), &AggregateLimits::default());
        let hosts: Vec<_> = digest.hosts().collect();
        assert_eq!(hosts, vec!["trusted.org", "two.com", "one.com", "three.com"]);
    }

    #[test]
    fn test_keywords_by_frequency_then_first_appearance() {
        let pieces = vec![
            piece("Battery life and charging speed", "a.com", 1.0, 0),
            piece("Charging speed matters for battery 2024", "b.com", 0.9, 1),
        ];
        let limits = AggregateLimits {
            max_keywords: 4,
            ..AggregateLimits::default()
        };
        let digest = aggregate(&pieces, &table(), &limits);
        assert_eq!(digest.keywords, vec!["battery", "charging", "speed", "life"]);
        assert_eq!(
            digest.group("b.com").unwrap().keywords,
            vec!["charging", "speed", "matters", "battery"]
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let pieces = vec![
            piece("Battery life is long", "a.com", 0.9, 0),
            piece("Battery life is short", "b.com", 0.9, 1),
            piece("Charging takes an hour", "a.com", 0.4, 2),
            piece("Charging is quick", "c.com", 2.0, 3),
            piece("Screens are bright", "a.com", 0.7, 4),
            piece("Screens are dim", "a.com", 0.1, 5),
        ];
        let limits = AggregateLimits::default();
        let once = aggregate(&pieces, &table(), &limits);
        let retained: Vec<_> = once.pieces().cloned().collect();
        let twice = aggregate(&retained, &table(), &limits);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        let digest = aggregate(&[], &table(), &AggregateLimits::default());
        assert!(digest.is_empty());
        assert!(digest.keywords.is_empty());
    }
}
