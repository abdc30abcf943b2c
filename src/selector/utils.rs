//! Utility functions for selector pattern matching
//!
//! Attribute access helpers that return empty strings instead of `Option`,
//! so rules read as plain boolean expressions.

use crate::dom;
use dom_query::Selection;

/// Get element ID attribute (empty string if missing)
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get any attribute (empty string if missing)
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Combine id and class, space separated, for multi-attribute checks
///
/// # Example
///
/// ```rust
/// use search_digest::selector::utils;
/// use search_digest::dom;
///
/// let doc = dom::parse(r#"<div id="main" class="content">text</div>"#);
/// let div = doc.select("div");
///
/// assert_eq!(utils::id_class(&div), "main content");
/// ```
#[inline]
#[must_use]
pub fn id_class(sel: &Selection) -> String {
    format!("{} {}", id(sel), class(sel)).trim().to_string()
}

/// Check if element is one of the specified tags
#[inline]
#[must_use]
pub fn is_one_of_tags(sel: &Selection, tags: &[&str]) -> bool {
    let t = tag(sel);
    tags.contains(&t.as_str())
}
