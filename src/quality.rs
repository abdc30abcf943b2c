//! Passage quality gate.
//!
//! Every passage must pass this gate before it is scored. The checks are
//! cheap shape heuristics that reject navigation fragments, price lists,
//! contact blocks, shouting and keyword-stuffed text.

use std::collections::HashMap;
use std::fmt;

use crate::options::Options;
use crate::patterns::{AT_MENTION, BOILERPLATE_PHRASE, EMAIL_ADDRESS, PHONE_NUMBER, PRICE_AMOUNT};
use crate::text;

const MIN_AVG_SENTENCE_WORDS: f64 = 3.0;
const MAX_AVG_SENTENCE_WORDS: f64 = 60.0;
const MIN_AVG_WORD_CHARS: f64 = 2.0;
const MAX_AVG_WORD_CHARS: f64 = 15.0;
const MAX_PUNCTUATION_DENSITY: f64 = 0.15;
const MAX_UPPERCASE_SHARE: f64 = 0.3;

/// Repetition is only judged once a passage has this many tokens.
const REPETITION_MIN_TOKENS: usize = 10;
/// Words this short or shorter are ignored by the repetition check.
const REPETITION_MIN_WORD_CHARS: usize = 3;
const MAX_WORD_SHARE: f64 = 0.2;

/// Why a passage failed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    TooLong,
    SentenceShape,
    WordShape,
    Punctuation,
    Price,
    Mention,
    Contact,
    BoilerplatePhrase,
    Uppercase,
    Repetition,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::TooShort => "too short",
            Self::TooLong => "too long",
            Self::SentenceShape => "unusual sentence length",
            Self::WordShape => "unusual word length",
            Self::Punctuation => "punctuation heavy",
            Self::Price => "price amount",
            Self::Mention => "@-mention",
            Self::Contact => "contact details",
            Self::BoilerplatePhrase => "boilerplate phrase",
            Self::Uppercase => "mostly uppercase",
            Self::Repetition => "repetitive",
        };
        f.write_str(reason)
    }
}

/// Length bounds plus the fixed shape heuristics.
#[derive(Debug, Clone, Copy)]
pub struct QualityGate {
    min_chars: usize,
    max_chars: usize,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl QualityGate {
    #[must_use]
    pub fn new(min_chars: usize, max_chars: usize) -> Self {
        Self {
            min_chars,
            max_chars,
        }
    }

    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.min_passage_chars, options.max_passage_chars)
    }

    /// Whether `passage` is acceptable content.
    #[must_use]
    pub fn passes(&self, passage: &str) -> bool {
        self.check(passage).is_ok()
    }

    /// Run every check in order, stopping at the first failure.
    pub fn check(&self, passage: &str) -> Result<(), Rejection> {
        let chars = passage.chars().count();
        if chars < self.min_chars {
            return Err(Rejection::TooShort);
        }
        if chars > self.max_chars {
            return Err(Rejection::TooLong);
        }

        let words: Vec<&str> = passage
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(Rejection::WordShape);
        }

        let sentences = text::split_sentences(passage).len().max(1);
        let avg_sentence = ratio(words.len(), sentences);
        if !(MIN_AVG_SENTENCE_WORDS..=MAX_AVG_SENTENCE_WORDS).contains(&avg_sentence) {
            return Err(Rejection::SentenceShape);
        }

        let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let avg_word = ratio(word_chars, words.len());
        if !(MIN_AVG_WORD_CHARS..=MAX_AVG_WORD_CHARS).contains(&avg_word) {
            return Err(Rejection::WordShape);
        }

        let punctuation = passage.chars().filter(char::is_ascii_punctuation).count();
        if ratio(punctuation, chars) > MAX_PUNCTUATION_DENSITY {
            return Err(Rejection::Punctuation);
        }

        check_boilerplate(passage)?;

        let letters = passage.chars().filter(|c| c.is_alphabetic()).count();
        let upper = passage.chars().filter(|c| c.is_uppercase()).count();
        if letters == 0 || ratio(upper, letters) >= MAX_UPPERCASE_SHARE {
            return Err(Rejection::Uppercase);
        }

        if is_repetitive(&words) {
            return Err(Rejection::Repetition);
        }

        Ok(())
    }
}

fn check_boilerplate(passage: &str) -> Result<(), Rejection> {
    if PRICE_AMOUNT.is_match(passage) {
        return Err(Rejection::Price);
    }
    if EMAIL_ADDRESS.is_match(passage) || PHONE_NUMBER.is_match(passage) {
        return Err(Rejection::Contact);
    }
    if AT_MENTION.is_match(passage) {
        return Err(Rejection::Mention);
    }
    if BOILERPLATE_PHRASE.is_match(passage) {
        return Err(Rejection::BoilerplatePhrase);
    }
    Ok(())
}

fn is_repetitive(words: &[&str]) -> bool {
    if words.len() < REPETITION_MIN_TOKENS {
        return false;
    }
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in words {
        if word.chars().count() > REPETITION_MIN_WORD_CHARS {
            *counts.entry(word.to_lowercase()).or_default() += 1;
        }
    }
    counts
        .values()
        .any(|&n| ratio(n, words.len()) > MAX_WORD_SHARE)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "The new model keeps its battery going for a full day of normal use in our tests.";

    #[test]
    fn test_ordinary_prose_passes() {
        assert_eq!(QualityGate::default().check(GOOD), Ok(()));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let gate = QualityGate::new(14, 20);
        assert_eq!(gate.check("One two three."), Ok(()));
        assert_eq!(gate.check("One two tre."), Err(Rejection::TooShort));
        assert_eq!(gate.check("Exactly twenty here."), Ok(()));
        assert_eq!(gate.check("This one is too long."), Err(Rejection::TooLong));
    }

    #[test]
    fn test_boilerplate_markers_are_rejected() {
        let gate = QualityGate::default();
        assert_eq!(
            gate.check("The base model sells for $799 at most retailers this autumn season."),
            Err(Rejection::Price)
        );
        assert_eq!(
            gate.check("Follow @macrumors on the social network for daily rumor updates."),
            Err(Rejection::Mention)
        );
        assert_eq!(
            gate.check("Write to press@example.com with any question about the new phones."),
            Err(Rejection::Contact)
        );
        assert_eq!(
            gate.check("Sign up for our weekly newsletter to get the latest phone reviews."),
            Err(Rejection::BoilerplatePhrase)
        );
    }

    #[test]
    fn test_shouting_is_rejected() {
        let gate = QualityGate::default();
        assert_eq!(
            gate.check("THE BATTERY LIFE OF THIS PHONE IS ABSOLUTELY AMAZING FOR EVERYONE."),
            Err(Rejection::Uppercase)
        );
    }

    #[test]
    fn test_keyword_stuffing_is_rejected() {
        let gate = QualityGate::default();
        let stuffed = "battery battery battery tips for the battery and the best battery charger today.";
        assert_eq!(gate.check(stuffed), Err(Rejection::Repetition));
    }

    #[test]
    fn test_punctuation_and_fragment_shapes() {
        let gate = QualityGate::default();
        assert_eq!(
            gate.check("Home. About. News. Blog. Shop. Help. Jobs. Press. Legal. Team."),
            Err(Rejection::SentenceShape)
        );
        assert_eq!(
            gate.check(r#""Battery" -- 'life' -- (and) "charge" -- 'speed' -- [were] "tested"..."#),
            Err(Rejection::Punctuation)
        );
    }
}
