use search_digest::extract_passages;

#[test]
fn nav_is_excluded_even_inside_article() {
    let html = r#"
        <html>
          <body>
            <article>
              <nav><p>MENUTEXT</p></nav>
              <p>BODYTEXT</p>
            </article>
          </body>
        </html>
    "#;

    let passages = extract_passages(html);
    assert!(passages.iter().any(|p| p.contains("BODYTEXT")));
    assert!(passages.iter().all(|p| !p.contains("MENUTEXT")));
}

#[test]
fn scripts_styles_and_hidden_nodes_are_excluded() {
    let html = r#"
        <html>
          <head><style>p { color: red }</style></head>
          <body>
            <script>var SCRIPTTEXT = 1;</script>
            <p hidden>HIDDENATTRTEXT</p>
            <p style="display: none">INLINEHIDDENTEXT</p>
            <p aria-hidden="true">ARIAHIDDENTEXT</p>
            <p>VISIBLETEXT</p>
          </body>
        </html>
    "#;

    let joined = extract_passages(html).join(" ");
    assert!(joined.contains("VISIBLETEXT"));
    for hidden in ["SCRIPTTEXT", "HIDDENATTRTEXT", "INLINEHIDDENTEXT", "ARIAHIDDENTEXT", "color"] {
        assert!(!joined.contains(hidden), "{hidden} leaked");
    }
}

#[test]
fn noise_classes_are_excluded() {
    let html = r#"
        <html>
          <body>
            <div class="cookie-banner"><p>COOKIETEXT</p></div>
            <div id="sidebar"><p>SIDEBARTEXT</p></div>
            <div class="article-content"><p>CONTENTTEXT</p></div>
          </body>
        </html>
    "#;

    let joined = extract_passages(html).join(" ");
    assert!(joined.contains("CONTENTTEXT"));
    assert!(!joined.contains("COOKIETEXT"));
    assert!(!joined.contains("SIDEBARTEXT"));
}

#[test]
fn page_without_markup_structure_still_yields_text() {
    let html = "<html><body><h2>HEADINGTEXT</h2><ul><li>ITEMTEXT</li></ul></body></html>";
    let passages = extract_passages(html);
    assert!(passages.iter().any(|p| p.contains("HEADINGTEXT")));
    assert!(passages.iter().any(|p| p.contains("ITEMTEXT")));
}

#[test]
fn malformed_html_does_not_panic() {
    for html in ["", "<", "<p>unclosed <b>bold", "<<<>>>", "<html><body></html></body>"] {
        let _ = extract_passages(html);
    }
}

#[test]
fn layout_wrappers_with_noisy_classes_keep_their_article() {
    for class in [
        "container has-sidebar",
        "layout-with-share-bar",
        "page menu-closed",
        "post-related-wrapper",
    ] {
        let html = format!(
            r#"<html><body>
                 <div class="{class}">
                   <aside class="sidebar"><p>SIDEBARTEXT</p></aside>
                   <article><p>The iPhone 15 battery lasts a full day of mixed use in our tests.</p></article>
                 </div>
               </body></html>"#
        );

        let passages = extract_passages(&html);
        assert!(
            passages.iter().any(|p| p.contains("iPhone 15 battery")),
            "article lost under class {class:?}: {passages:?}"
        );
        assert!(passages.iter().all(|p| !p.contains("SIDEBARTEXT")));
    }
}

#[test]
fn comment_threads_are_still_dropped() {
    let html = r#"
        <html>
          <body>
            <article><p>ARTICLEBODY</p></article>
            <div id="comments"><article class="comment"><p>COMMENTTEXT</p></article></div>
          </body>
        </html>
    "#;

    let joined = extract_passages(html).join(" ");
    assert!(joined.contains("ARTICLEBODY"));
    assert!(!joined.contains("COMMENTTEXT"));
}
