//! Selector Infrastructure
//!
//! Rules are simple predicate functions over a single element. The
//! extractor uses two rule sets: noise rules ([`discard`]) that mark page
//! chrome for removal, and content rules ([`content`]) that find the main
//! content containers in priority order.

use dom_query::Selection;

pub mod content;
pub mod discard;
pub mod utils;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Query for all elements matching the rule, in document order.
///
/// # Example
///
/// ```rust
/// use search_digest::selector::{self, utils};
/// use search_digest::dom;
///
/// let doc = dom::parse(r#"<div><p class="content">a</p><p>b</p><p class="content">c</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     utils::class(sel).contains("content")
/// }
///
/// assert_eq!(selector::query_all(&root, has_content_class).len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}

/// Whether any rule in `rules` matches `sel`.
#[must_use]
pub fn matches_any(sel: &Selection, rules: &[Rule]) -> bool {
    rules.iter().any(|rule| rule(sel))
}
