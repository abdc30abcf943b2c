//! Text normalization shared by the extractor, scorer, aggregator and summarizer.

use crate::lexicon;
use crate::patterns::{DISALLOWED_CHARS, SENTENCE_BOUNDARY, WHITESPACE_NORMALIZE};

/// Tokens of this many characters or fewer are dropped.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Suffixes removed by [`stem`], tried in order.
const STEM_SUFFIXES: [&str; 4] = ["ing", "ed", "ly", "s"];

/// Shortest stem [`stem`] will produce.
const MIN_STEM_CHARS: usize = 3;

/// Clean a raw passage: decode entities, drop characters outside the
/// passage alphabet, collapse whitespace, trim.
///
/// ```
/// use search_digest::text::clean_passage;
///
/// assert_eq!(clean_passage("  Battery&nbsp;life &amp; charging ★ \n tips "), "Battery life & charging tips");
/// ```
#[must_use]
pub fn clean_passage(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let stripped = DISALLOWED_CHARS.replace_all(&decoded, " ");
    WHITESPACE_NORMALIZE
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Lowercase `text`, split on anything that is not a letter or digit, and
/// keep tokens longer than [`MIN_TOKEN_CHARS`].
///
/// Stop words are kept; see [`content_tokens`].
#[must_use]
pub fn raw_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Tokens with stop words removed, unstemmed.
#[must_use]
pub fn content_tokens(text: &str) -> Vec<String> {
    raw_tokens(text)
        .into_iter()
        .filter(|t| !lexicon::is_stop_word(t))
        .collect()
}

/// Tokens with stop words removed and [`stem`] applied.
#[must_use]
pub fn stemmed_tokens(text: &str) -> Vec<String> {
    content_tokens(text).iter().map(|t| stem(t)).collect()
}

/// Light suffix stemmer: strips the first of `ing`, `ed`, `ly`, `s` that
/// leaves at least three characters.
///
/// ```
/// use search_digest::text::stem;
///
/// assert_eq!(stem("processors"), "processor");
/// assert_eq!(stem("charging"), "charg");
/// assert_eq!(stem("charged"), "charg");
/// assert_eq!(stem("bus"), "bus");
/// ```
#[must_use]
pub fn stem(token: &str) -> String {
    for suffix in STEM_SUFFIXES {
        if let Some(base) = token.strip_suffix(suffix) {
            if base.chars().count() >= MIN_STEM_CHARS {
                return base.to_string();
            }
        }
    }
    token.to_string()
}

/// Split text into trimmed, non-empty sentences, keeping terminal punctuation.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BOUNDARY.find_iter(text) {
        let sentence = text[start..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = m.end();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Truncate to at most `max_chars` characters on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
