//! Domain trust table.
//!
//! Maps hostnames to a static trust weight in `[1.0, 5.0]`. Lookups are
//! suffix matches on label boundaries; the longest matching entry wins and
//! unknown hosts get [`DEFAULT_TRUST`]. The table is immutable once built and
//! safe to share across threads.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::lexicon::domains::TRUST_WEIGHTS;
use crate::url_utils::{host_matches_suffix, normalize_host};

/// Weight of a host with no table entry.
pub const DEFAULT_TRUST: f64 = 1.0;

/// Lowest weight an entry may carry.
pub const MIN_TRUST: f64 = 1.0;

/// Highest weight an entry may carry.
pub const MAX_TRUST: f64 = 5.0;

static BUILTIN: LazyLock<DomainTrustTable> =
    LazyLock::new(|| DomainTrustTable::from_entries(TRUST_WEIGHTS.iter().copied()));

/// Static hostname → trust weight mapping.
#[derive(Debug, Clone, Default)]
pub struct DomainTrustTable {
    entries: HashMap<String, f64>,
}

impl DomainTrustTable {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a table from `(host, weight)` pairs. Weights are clamped to `[1.0, 5.0]`.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(host, weight)| (normalize_host(host), weight.clamp(MIN_TRUST, MAX_TRUST)))
            .filter(|(host, _)| !host.is_empty())
            .collect();
        Self { entries }
    }

    /// The built-in table with `overrides` merged on top.
    #[must_use]
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Self {
        let mut table = Self::builtin().clone();
        for (host, weight) in overrides {
            let host = normalize_host(host);
            if !host.is_empty() {
                table.entries.insert(host, weight.clamp(MIN_TRUST, MAX_TRUST));
            }
        }
        table
    }

    /// Trust weight of `host`.
    ///
    /// ```
    /// use search_digest::trust::DomainTrustTable;
    ///
    /// let table = DomainTrustTable::builtin();
    /// assert_eq!(table.weight("news.bbc.com"), table.weight("bbc.com"));
    /// assert_eq!(table.weight("randomblog.io"), 1.0);
    /// ```
    #[must_use]
    pub fn weight(&self, host: &str) -> f64 {
        let host = normalize_host(host);
        if let Some(weight) = self.entries.get(&host) {
            return *weight;
        }

        // Walk parent domains from most to least specific.
        let mut rest = host.as_str();
        while let Some((_, parent)) = rest.split_once('.') {
            if let Some(weight) = self.entries.get(parent) {
                debug_assert!(host_matches_suffix(&host, parent));
                return *weight;
            }
            rest = parent;
        }

        DEFAULT_TRUST
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
