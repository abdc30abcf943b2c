//! Noise Discard Rules
//!
//! Identifies page chrome (navigation, headers, footers, sidebars, ads,
//! consent banners, forms, hidden elements) that is removed before passages
//! are selected.

use crate::patterns::{CONTENT_CLASS, NOISE_CLASS};
use crate::selector::utils::{attr, id_class, tag};
use crate::selector::Rule;
use dom_query::Selection;

/// Tags removed outright, whatever their attributes.
pub const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "iframe", "form",
    "button", "svg", "template", "select", "input", "object", "embed", "dialog", "canvas",
];

/// Roles of landmark regions that never hold the main content.
const NOISE_ROLES: &[&str] = &[
    "navigation",
    "banner",
    "contentinfo",
    "complementary",
    "dialog",
    "alertdialog",
    "search",
];

/// Tags whose class names are not trusted to mark noise: page wrappers often
/// carry layout classes such as `has-sidebar`.
const NEVER_DISCARD_BY_CLASS: &[&str] = &["html", "body", "main", "article"];

/// Descendants that mark a wrapper as holding the main content.
const MAIN_CONTENT_MARKERS: &str = "article, main, [role='main'], [itemprop='articleBody']";

/// Noise rules, checked in order.
pub static NOISE_RULES: &[Rule] = &[noise_tag_rule, noise_role_rule, hidden_rule, noise_class_rule];

/// Rule 1: structural noise tags.
#[must_use]
pub fn noise_tag_rule(sel: &Selection) -> bool {
    NOISE_TAGS.contains(&tag(sel).as_str())
}

/// Rule 2: landmark roles of non-content regions.
#[must_use]
pub fn noise_role_rule(sel: &Selection) -> bool {
    let role = attr(sel, "role").to_ascii_lowercase();
    NOISE_ROLES.contains(&role.as_str())
}

/// Rule 3: elements hidden from the reader.
#[must_use]
pub fn hidden_rule(sel: &Selection) -> bool {
    if sel.has_attr("hidden") || attr(sel, "aria-hidden").eq_ignore_ascii_case("true") {
        return true;
    }
    let style: String = attr(sel, "style")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    style.contains("display:none") || style.contains("visibility:hidden")
}

/// Rule 4: class/id names of chrome containers (cookie, ad, banner, sidebar,
/// comment, share, popup, newsletter and similar).
///
/// A container that wraps the main content is kept whatever its class:
/// layout wrappers such as `container has-sidebar` would otherwise take the
/// article down with them.
#[must_use]
pub fn noise_class_rule(sel: &Selection) -> bool {
    if NEVER_DISCARD_BY_CLASS.contains(&tag(sel).as_str()) {
        return false;
    }
    let names = id_class(sel);
    !names.is_empty() && NOISE_CLASS.is_match(&names) && !wraps_main_content(sel)
}

/// Whether `sel` has a main-content landmark or a content-class container
/// below it. Descendants that are themselves noise-classed (an `<article
/// class="comment">`, say) do not count.
#[must_use]
pub fn wraps_main_content(sel: &Selection) -> bool {
    let landmark = sel
        .select(MAIN_CONTENT_MARKERS)
        .iter()
        .any(|inner| !NOISE_CLASS.is_match(&id_class(&inner)));
    landmark
        || sel.select("[id], [class]").iter().any(|inner| {
            let names = id_class(&inner);
            CONTENT_CLASS.is_match(&names) && !NOISE_CLASS.is_match(&names)
        })
}
