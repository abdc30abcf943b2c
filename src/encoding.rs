//! Charset-aware decoding of fetched page bodies.
//!
//! The encoding is resolved from, in order: a byte-order mark, the
//! `Content-Type` response header, a `<meta>` declaration in the first
//! kilobyte of the document, and finally UTF-8. Undecodable bytes become
//! U+FFFD rather than failing the page.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes of the document searched for a `<meta>` charset.
const META_SNIFF_BYTES: usize = 1024;

/// `charset=` inside a `<meta charset>` or `<meta http-equiv content>` tag.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;/>]+)"#).expect("META_CHARSET regex")
});

/// Charset parameter of a `Content-Type` header value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("HEADER_CHARSET regex")
});

/// Resolve the encoding of a response body.
#[must_use]
pub fn resolve_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return encoding;
    }
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8)
}

/// Encoding named by a `Content-Type` header, if known to `encoding_rs`.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let label = HEADER_CHARSET.captures(content_type)?.get(1)?;
    Encoding::for_label(label.as_str().as_bytes())
}

/// Encoding declared by a `<meta>` tag near the top of `body`.
#[must_use]
pub fn charset_from_meta(body: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&body[..body.len().min(META_SNIFF_BYTES)]);
    let label = META_CHARSET.captures(&head)?.get(1)?;
    Encoding::for_label(label.as_str().as_bytes())
}

/// Decode a response body to UTF-8, replacing invalid sequences.
///
/// ```
/// use search_digest::encoding::decode_body;
///
/// let latin1 = b"<p>caf\xe9</p>";
/// assert_eq!(decode_body(latin1, Some("text/html; charset=ISO-8859-1")), "<p>café</p>");
/// assert_eq!(decode_body(b"<p>plain</p>", None), "<p>plain</p>");
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = resolve_encoding(body, content_type);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}
