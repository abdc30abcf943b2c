use search_digest::search::{is_denied, parse_results, widen_query};
use search_digest::{Error, Query, QueryWidening};
use url::Url;

fn base() -> Url {
    Url::parse("https://html.duckduckgo.com/html/").unwrap()
}

const RESULTS_PAGE: &str = r#"
<html><body><div id="links" class="results">
  <div class="result"><div class="result__body">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FLithium-ion_battery&amp;rut=x">Lithium-ion battery</a>
  </div></div>
  <div class="result"><div class="result__body">
    <a class="result__a" href="https://www.linkedin.com/pulse/battery">LinkedIn</a>
  </div></div>
  <div class="result"><div class="result__body">
    <a class="result__a" href="https://example.com/account/login?next=/battery">Login</a>
  </div></div>
  <div class="result"><div class="result__body">
    <a class="result__a" href="https://www.batteryuniversity.com/article/bu-808">Battery University</a>
  </div></div>
  <div class="result"><div class="result__body">
    <a class="result__a" href="https://en.wikipedia.org/wiki/Lithium-ion_battery">Duplicate</a>
  </div></div>
</div></body></html>"#;

#[test]
fn results_page_is_unwrapped_filtered_and_deduplicated() {
    let links = parse_results(RESULTS_PAGE, &base()).unwrap();
    let hosts: Vec<_> = links.iter().map(|l| l.host.as_str()).collect();
    assert_eq!(hosts, vec!["en.wikipedia.org", "batteryuniversity.com"]);
    assert_eq!(
        links[0].url.as_str(),
        "https://en.wikipedia.org/wiki/Lithium-ion_battery"
    );
}

#[test]
fn empty_results_page_parses_to_nothing() {
    let html = r#"<html><body><div id="links"><div class="no-results">No results.</div></div></body></html>"#;
    assert!(parse_results(html, &base()).unwrap().is_empty());
}

#[test]
fn challenge_page_is_upstream_unavailable() {
    let html = "<html><body><h1>Please verify you are human</h1></body></html>";
    assert!(matches!(
        parse_results(html, &base()),
        Err(Error::UpstreamUnavailable(_))
    ));
}

#[test]
fn denylist_matches_domain_suffixes_and_path_segments() {
    let denied = |s: &str| is_denied(&Url::parse(s).unwrap());
    assert!(denied("https://m.facebook.com/apple"));
    assert!(denied("https://example.com/privacy-policy"));
    assert!(!denied("https://www.theverge.com/iphone-review"));
    assert!(!denied("https://en.wikipedia.org/wiki/Legal_drinking_age"));
    assert!(!denied("https://www.britannica.com/topic/terms-of-trade"));
}

#[test]
fn widening_is_opt_in() {
    let query = Query::parse("rust compiler errors").unwrap();
    assert_eq!(widen_query(&query, QueryWidening::None), "rust compiler errors");

    let widened = widen_query(&query, QueryWidening::TechSites);
    assert!(widened.starts_with("rust compiler errors ("));
    assert!(widened.contains("site:"));

    let plain = Query::parse("banana bread recipe").unwrap();
    assert_eq!(widen_query(&plain, QueryWidening::TechSites), "banana bread recipe");
}
