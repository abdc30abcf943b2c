//! Error types for search-digest.
//!
//! This module defines the errors a digest run can surface to the caller.
//! Per-page fetch failures and generative summarization failures are not
//! errors at this level: they are recorded on the page or folded into the
//! extractive fallback.

/// Error type for digest operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The query was empty or equal to the placeholder sentinel.
    ///
    /// Raised before any network activity. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// The search engine could not be reached or its result page could not be parsed.
    #[error("Search engine unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The search engine answered but no candidate link survived filtering.
    #[error("No search results found")]
    NoResultsFound,

    /// Every page fetch failed or no passage qualified.
    #[error("Could not extract meaningful information from the sources")]
    NoContentExtracted,

    /// The run was cancelled by the caller; partial results were discarded.
    #[error("Search cancelled")]
    Cancelled,

    /// Configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error should be presented as "no results" rather than a failure.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_) | Self::NoResultsFound | Self::NoContentExtracted
        )
    }
}

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, Error>;
