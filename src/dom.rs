//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the selector rules and
//! the content extractor.

pub use dom_query::{Document, Selection};

// Text comes back as a reference-counted StrTendril; cloning is O(1).
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Visit every element of `sel` (and descendants) in document order,
/// handing each one to `visit` as its own single-node selection.
pub fn for_each_element<'a>(sel: &Selection<'a>, css: &str, mut visit: impl FnMut(Selection<'a>)) {
    for node in sel.select(css).nodes() {
        visit(Selection::from(*node));
    }
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container".to_string()));
        assert_eq!(tag_name(&div), Some("div".to_string()));
    }

    #[test]
    fn test_remove_elements() {
        let doc = parse(r#"<div><span class="ad">ad</span><p>content</p></div>"#);

        remove(&doc.select(".ad"));

        let text = text_content(&doc.select("div"));
        assert_eq!(&*text, "content");
    }

    #[test]
    fn test_for_each_element_visits_in_document_order() {
        let doc = parse("<ul><li>one</li><li>two</li></ul><p><li>three</li></p>");
        let mut seen = Vec::new();
        for_each_element(&doc.select("html"), "li", |li| seen.push(text_content(&li).to_string()));
        assert_eq!(seen, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_text_content_decodes_entities() {
        let doc = parse("<p>Fish &amp; chips</p>");
        assert_eq!(&*text_content(&doc.select("p")), "Fish & chips");
    }
}
