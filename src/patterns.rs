//! Compiled regex patterns for passage cleaning and quality gating.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! Patterns are organized by their purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Markers (passage level)
// =============================================================================

/// Matches a currency amount such as `$19.99`, `€ 5` or `£1,200`.
pub static PRICE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£¥]\s?\d").expect("PRICE_AMOUNT regex"));

/// Matches an `@`-mention (`@handle`) that is not part of an email address.
pub static AT_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w.])@\w{2,}").expect("AT_MENTION regex"));

/// Matches an email address.
pub static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("EMAIL_ADDRESS regex")
});

/// Matches a phone-number shape (`+1 (555) 123-4567`, `044 123 45 67`).
pub static PHONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{2,4}\)?[\s.-]\d{3}[\s.-]\d{2,4}(?:[\s.-]\d{2})?\b")
        .expect("PHONE_NUMBER regex")
});

/// Matches phrases that only appear in page chrome: consent banners,
/// subscription prompts, advertising and account prompts.
pub static BOILERPLATE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(cookies?|cookie[-\s]?policy|accept all|subscribe|subscription|newsletter|sign[-\s]?(?:in|up)|log[-\s]?in|advertisement|advertising|sponsored|all rights reserved|privacy policy|terms of (?:use|service)|click here|read more)\b",
    )
    .expect("BOILERPLATE_PHRASE regex")
});

// =============================================================================
// Node-level Noise (class / id attributes)
// =============================================================================

/// Matches class/id values of containers that hold page chrome rather than content.
///
/// `ad` and `ads` only match as whole tokens so `header`, `shadow` or
/// `download` are not caught.
pub static NOISE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(cookie|(?:^|[\s_-])ads?(?:$|[\s_-])|advert|banner|sidebar|comment|share|social|popup|pop-up|modal|newsletter|subscribe|promo|related|breadcrumb|menu|navbar|consent)",
    )
    .expect("NOISE_CLASS regex")
});

/// Matches class/id values of containers likely to hold the main content.
pub static CONTENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|content|post|entry|story|main[-_]?text|body[-_]?text)")
        .expect("CONTENT_CLASS regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Matches any character outside the conservative passage alphabet.
pub static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\p{L}\p{N}\s.,;:!?'"()%/&$€£@+\-]"#).expect("DISALLOWED_CHARS regex")
});

/// Splits text into sentences after terminal punctuation.
pub static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("SENTENCE_BOUNDARY regex"));

/// Matches a numeric literal (`15`, `3.5`, `1,200`, `40%`).
pub static NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:[.,]\d+)*%?").expect("NUMERIC_LITERAL regex"));

/// Matches a bullet line in generated text (`• point`, `- point`, `* point`).
pub static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[•*\-]|\d+[.)])\s+(.+)$").expect("BULLET_LINE regex"));
