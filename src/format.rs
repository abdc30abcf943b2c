//! Digest rendering.
//!
//! Pure functions from a [`Digest`] to its HTML or plain-text form. Lists are
//! rendered up to fixed caps and never beyond; everything below a cap is
//! rendered. All user and page text is HTML-escaped in HTML output.

use std::fmt::Write;

use html_escape::encode_text;

use crate::result::{Digest, StrategyUsed};

/// Key points rendered per list.
pub const MAX_RENDERED_KEY_POINTS: usize = 5;

/// Keywords rendered per list.
pub const MAX_RENDERED_KEYWORDS: usize = 8;

const STYLE: &str = "\
body { font-family: 'Segoe UI', Arial, sans-serif; line-height: 1.6; padding: 2em; max-width: 800px; margin: 0 auto; }
h2 { color: #1a73e8; border-bottom: 2px solid #f0f0f0; padding-bottom: 0.5em; }
.badge { display: inline-block; font-size: 0.8em; padding: 0.1em 0.6em; border-radius: 1em; }
.badge.ai { background: #e8f0fe; color: #1a73e8; }
.badge.results { background: #f1f3f4; color: #5f6368; }
.summary { background: #f8f9fa; padding: 1.5em; border-radius: 8px; margin: 1em 0; }
.keywords span { display: inline-block; background: #f1f3f4; border-radius: 4px; padding: 0 0.4em; margin: 0 0.3em 0.3em 0; }
.source { margin-top: 1.5em; }
.sources { font-size: 0.9em; color: #666; margin-top: 2em; padding-top: 1em; border-top: 1px solid #eee; }";

/// Render `digest` as a standalone HTML document.
///
/// ```
/// use chrono::Utc;
/// use search_digest::format::render_html;
/// use search_digest::{Digest, SearchDigest, StrategyUsed, Summary};
///
/// let digest = Digest {
///     query: "fish & chips".into(),
///     search_digest: SearchDigest::default(),
///     summary: Summary {
///         narrative: "Nothing found.".into(),
///         key_points: vec![],
///         keywords: vec![],
///         strategy_used: StrategyUsed::Extractive,
///     },
///     generated_at: Utc::now(),
/// };
/// let html = render_html(&digest);
/// assert!(html.contains("<h2>fish &amp; chips</h2>"));
/// assert!(html.contains("Search results"));
/// ```
#[must_use]
pub fn render_html(digest: &Digest) -> String {
    let summary = &digest.summary;
    let badge_class = match summary.strategy_used {
        StrategyUsed::Generative => "ai",
        StrategyUsed::Extractive => "results",
    };

    let mut out = String::new();
    out.push_str("<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    out.push_str(&encode_text(&digest.query));
    out.push_str("</title>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("\n</style>\n</head>\n<body>\n");

    let _ = writeln!(out, "<h2>{}</h2>", encode_text(&digest.query));
    let _ = writeln!(
        out,
        "<span class=\"badge {badge_class}\">{}</span>",
        summary.strategy_used.label()
    );

    out.push_str("<div class=\"summary\">\n");
    for paragraph in summary.narrative.split("\n\n").filter(|p| !p.trim().is_empty()) {
        let _ = writeln!(out, "<p>{}</p>", encode_text(paragraph.trim()));
    }
    out.push_str("</div>\n");

    push_html_list(&mut out, "key-points", &summary.key_points);
    push_html_keywords(&mut out, &summary.keywords);

    for group in &digest.search_digest.groups {
        let _ = writeln!(out, "<div class=\"source\">\n<h3>{}</h3>", encode_text(&group.host));
        let points: Vec<String> = group.pieces.iter().map(|p| p.text.clone()).collect();
        push_html_list(&mut out, "key-points", &points);
        push_html_keywords(&mut out, &group.keywords);
        out.push_str("</div>\n");
    }

    let hosts: Vec<&str> = digest.search_digest.hosts().collect();
    if !hosts.is_empty() {
        let _ = writeln!(
            out,
            "<div class=\"sources\">Sources: {}</div>",
            encode_text(&hosts.join(", "))
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn push_html_list(out: &mut String, class: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "<div class=\"{class}\">\n<ul>");
    for item in items.iter().take(MAX_RENDERED_KEY_POINTS) {
        let _ = writeln!(out, "<li>{}</li>", encode_text(item));
    }
    out.push_str("</ul>\n</div>\n");
}

fn push_html_keywords(out: &mut String, keywords: &[String]) {
    if keywords.is_empty() {
        return;
    }
    out.push_str("<div class=\"keywords\">");
    for keyword in keywords.iter().take(MAX_RENDERED_KEYWORDS) {
        let _ = write!(out, "<span>{}</span>", encode_text(keyword));
    }
    out.push_str("</div>\n");
}

/// Render `digest` as plain text.
#[must_use]
pub fn render_text(digest: &Digest) -> String {
    let summary = &digest.summary;
    let mut out = String::new();

    let _ = writeln!(out, "{}", digest.query);
    let _ = writeln!(out, "{}", "=".repeat(digest.query.chars().count().max(3)));
    let _ = writeln!(out, "[{}]\n", summary.strategy_used.label());
    let _ = writeln!(out, "{}\n", summary.narrative.trim());

    push_text_list(&mut out, &summary.key_points);
    push_text_keywords(&mut out, &summary.keywords);

    for group in &digest.search_digest.groups {
        let _ = writeln!(out, "\n## {}", group.host);
        let points: Vec<String> = group.pieces.iter().map(|p| p.text.clone()).collect();
        push_text_list(&mut out, &points);
        push_text_keywords(&mut out, &group.keywords);
    }

    let hosts: Vec<&str> = digest.search_digest.hosts().collect();
    if !hosts.is_empty() {
        let _ = writeln!(out, "\nSources: {}", hosts.join(", "));
    }
    out
}

fn push_text_list(out: &mut String, items: &[String]) {
    for item in items.iter().take(MAX_RENDERED_KEY_POINTS) {
        let _ = writeln!(out, "• {item}");
    }
}

fn push_text_keywords(out: &mut String, keywords: &[String]) {
    if keywords.is_empty() {
        return;
    }
    let shown: Vec<&str> = keywords
        .iter()
        .take(MAX_RENDERED_KEYWORDS)
        .map(String::as_str)
        .collect();
    let _ = writeln!(out, "Keywords: {}", shown.join(", "));
}
