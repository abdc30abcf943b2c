//! Content selector rules
//!
//! Candidate passages are taken from the first selector group that yields
//! any node. Groups run from the most specific article markup down to
//! generic class-named containers; when none match, every paragraph,
//! heading and list item in the page is a candidate.

use std::collections::HashSet;

use dom_query::{NodeId, Selection};

use crate::dom;
use crate::patterns::{CONTENT_CLASS, NOISE_CLASS};
use crate::selector::utils::{id_class, is_one_of_tags};
use crate::selector::{query_all, Rule};

/// CSS selector groups in priority order. First group with a match wins.
pub const PASSAGE_SELECTORS: &[&str] = &[
    "article p",
    "main p",
    "[role='main'] p",
    "[itemprop='articleBody'] p",
];

/// Used when neither a selector group nor a content container matches.
pub const FALLBACK_SELECTOR: &str = "p, h1, h2, h3, h4, li";

/// Container rules, checked after [`PASSAGE_SELECTORS`].
pub static CONTENT_RULES: &[Rule] = &[content_container_rule];

/// A block container whose id/class names it as the article body
/// (`content`, `post`, `article`, `entry`, `story`, ...).
#[must_use]
pub fn content_container_rule(sel: &Selection) -> bool {
    if !is_one_of_tags(sel, &["div", "section", "td"]) {
        return false;
    }
    let names = id_class(sel);
    !names.is_empty() && CONTENT_CLASS.is_match(&names) && !NOISE_CLASS.is_match(&names)
}

/// Candidate passage nodes under `root`, in document order.
///
/// A paragraph reachable through several matched containers is returned
/// once.
#[must_use]
pub fn candidate_nodes<'a>(root: &Selection<'a>) -> Vec<Selection<'a>> {
    for css in PASSAGE_SELECTORS {
        let nodes = collect_unique(std::slice::from_ref(root), css);
        if !nodes.is_empty() {
            return nodes;
        }
    }

    for rule in CONTENT_RULES {
        let containers = query_all(root, *rule);
        let nodes = collect_unique(&containers, "p");
        if !nodes.is_empty() {
            return nodes;
        }
    }

    collect_unique(std::slice::from_ref(root), FALLBACK_SELECTOR)
}

fn collect_unique<'a>(roots: &[Selection<'a>], css: &str) -> Vec<Selection<'a>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut nodes = Vec::new();
    for root in roots {
        dom::for_each_element(root, css, |sel| {
            let Some(id) = sel.nodes().first().map(|n| n.id) else {
                return;
            };
            if seen.insert(id) {
                nodes.push(sel);
            }
        });
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(nodes: &[Selection]) -> Vec<String> {
        nodes.iter().map(|n| dom::text_content(n).trim().to_string()).collect()
    }

    #[test]
    fn test_article_paragraphs_win() {
        let doc = dom::parse(
            r#"<body>
                <p>outside</p>
                <article><h2>Title</h2><p>inside one</p><p>inside two</p></article>
            </body>"#,
        );
        let nodes = candidate_nodes(&doc.select("body"));
        assert_eq!(texts(&nodes), vec!["inside one", "inside two"]);
    }

    #[test]
    fn test_main_used_when_no_article() {
        let doc = dom::parse(r#"<body><p>outside</p><main><p>main text</p></main></body>"#);
        let nodes = candidate_nodes(&doc.select("body"));
        assert_eq!(texts(&nodes), vec!["main text"]);
    }

    #[test]
    fn test_content_class_containers() {
        let doc = dom::parse(
            r#"<body>
                <div class="layout"><p>chrome</p></div>
                <div class="post-content"><p>first</p><div class="entry"><p>nested</p></div></div>
            </body>"#,
        );
        let nodes = candidate_nodes(&doc.select("body"));
        assert_eq!(texts(&nodes), vec!["first", "nested"]);
    }

    #[test]
    fn test_fallback_takes_paragraphs_headings_and_items() {
        let doc = dom::parse(
            r#"<body><h1>Head</h1><div><p>para</p></div><ul><li>item</li></ul><span>skip</span></body>"#,
        );
        let nodes = candidate_nodes(&doc.select("body"));
        assert_eq!(texts(&nodes), vec!["Head", "para", "item"]);
    }

    #[test]
    fn test_container_rule_rejects_noise_names() {
        let doc = dom::parse(r#"<div class="post-comments">x</div><span class="content">y</span>"#);
        assert!(!content_container_rule(&doc.select("div")));
        assert!(!content_container_rule(&doc.select("span")));
    }
}
