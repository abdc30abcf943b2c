//! Passage extraction.
//!
//! Turns one page of raw HTML into a list of cleaned candidate passages:
//! page chrome is removed first, then passages are taken from the best
//! content container, cleaned, and de-duplicated within the page.

use std::collections::HashSet;

use tracing::debug;

use crate::dom::{self, Document, Selection};
use crate::selector::{self, content, discard};
use crate::text;

/// Extract cleaned candidate passages from `html`, in document order.
///
/// Pure: no network access and no shared state. Empty strings and exact
/// duplicates within the page are dropped. Passages are not length-checked
/// here; that is the quality gate's job.
///
/// ```
/// use search_digest::extract_passages;
///
/// let html = r#"<html><body>
///     <nav><p>Home | About</p></nav>
///     <article><p>The battery lasts &amp; lasts.</p></article>
/// </body></html>"#;
///
/// assert_eq!(extract_passages(html), vec!["The battery lasts & lasts."]);
/// ```
#[must_use]
pub fn extract_passages(html: &str) -> Vec<String> {
    let document = dom::parse(html);
    let removed = remove_noise(&document);

    let root = content_root(&document);
    let nodes = content::candidate_nodes(&root);

    let mut seen = HashSet::new();
    let passages: Vec<String> = nodes
        .iter()
        .map(|node| text::clean_passage(&dom::text_content(node)))
        .filter(|passage| !passage.is_empty())
        .filter(|passage| seen.insert(passage.clone()))
        .collect();

    debug!(
        removed_nodes = removed,
        candidates = nodes.len(),
        passages = passages.len(),
        "extracted passages"
    );
    passages
}

/// Remove every element matched by a noise rule. Returns how many matched.
fn remove_noise(document: &Document) -> usize {
    let root = document.select("html");
    let noisy = selector::query_all(&root, |sel| selector::matches_any(sel, discard::NOISE_RULES));
    for sel in &noisy {
        dom::remove(sel);
    }
    noisy.len()
}

fn content_root(document: &Document) -> Selection<'_> {
    let body = document.select("body");
    if body.exists() {
        body
    } else {
        document.select("html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_removed_before_selection() {
        let html = r#"<html><head><style>p { color: red }</style></head><body>
            <header><p>Site header</p></header>
            <div class="cookie-banner"><p>We use cookies</p></div>
            <p>Real paragraph one.</p>
            <aside><p>Sidebar text</p></aside>
            <p>Real paragraph two.</p>
            <script>var x = 1;</script>
            <footer><p>Footer</p></footer>
        </body></html>"#;
        assert_eq!(
            extract_passages(html),
            vec!["Real paragraph one.", "Real paragraph two."]
        );
    }

    #[test]
    fn test_duplicates_and_empty_nodes_are_dropped() {
        let html = "<body><p>Same text.</p><p>   </p><p>Same   text.</p><p>Other.</p></body>";
        assert_eq!(extract_passages(html), vec!["Same text.", "Other."]);
    }

    #[test]
    fn test_cleaning_strips_symbols_and_decodes_entities() {
        let html = "<body><main><p>Fast &#x2605; charging &mdash; 50% in 30 min</p></main></body>";
        assert_eq!(extract_passages(html), vec!["Fast charging 50% in 30 min"]);
    }

    #[test]
    fn test_hidden_content_is_removed() {
        let html = r#"<body><p>Visible.</p><p style="display:none">Hidden.</p></body>"#;
        assert_eq!(extract_passages(html), vec!["Visible."]);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(extract_passages("").is_empty());
        assert!(extract_passages("<<<>>>").is_empty());
    }
}
