//! The validated user query.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::options::PLACEHOLDER_QUERY;
use crate::text;

/// User-facing message for an empty or placeholder query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// A trimmed, non-empty query that is not the UI placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    terms: Vec<String>,
}

impl Query {
    /// Validate raw input.
    ///
    /// Fails with [`Error::Validation`] when the trimmed input is empty or
    /// equals the placeholder sentinel (case-insensitive).
    ///
    /// ```
    /// use search_digest::Query;
    ///
    /// assert!(Query::parse("  iphone 15 battery life ").is_ok());
    /// assert!(Query::parse("   ").is_err());
    /// assert!(Query::parse("Search the Web").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(PLACEHOLDER_QUERY) {
            return Err(Error::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }

        let mut seen = HashSet::new();
        let terms = text::stemmed_tokens(trimmed)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();

        Ok(Self {
            text: trimmed.to_string(),
            terms,
        })
    }

    /// The trimmed query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Distinct stemmed content terms, in query order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Stemmed terms as a set, for overlap tests.
    #[must_use]
    pub fn term_set(&self) -> HashSet<&str> {
        self.terms.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
