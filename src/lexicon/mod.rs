//! Static word and domain tables.
//!
//! Every list the pipeline consults lives here, one file per language plus
//! one for domains, so the tables can be reviewed in one place.
//! Tables are plain `&'static [&str]` slices; the lookup sets are built once.

use std::collections::HashSet;
use std::sync::LazyLock;

pub mod de;
pub mod domains;
pub mod en;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    en::STOP_WORDS
        .iter()
        .chain(de::STOP_WORDS.iter())
        .copied()
        .collect()
});

/// Whether `word` (already lowercased) is a stop word in any bundled language.
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Reasoning connectives of every bundled language.
pub fn connectives() -> impl Iterator<Item = &'static str> {
    en::CONNECTIVES.iter().chain(de::CONNECTIVES.iter()).copied()
}
