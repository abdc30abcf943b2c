//! Performance benchmarks for the offline stages of a digest run.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Passage extraction from a small synthetic page
//! - Quality gating and relevance scoring of the extracted passages
//! - Extraction over a page scaled up to many paragraphs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use search_digest::{
    aggregate, extract_passages, AggregateLimits, ContentPiece, DomainTrustTable, QualityGate,
    Query, RelevanceScorer, ScoringWeights,
};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>iPhone 15 battery review</title>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>iPhone 15 battery life, tested</h1>
        <p>In our video playback test the iPhone 15 lasted 20 hours, because the A16 chip draws less power at idle.</p>
        <p>Charging from empty to 50 percent took 31 minutes with a 20W adapter, therefore a quick top-up covers a full day.</p>
        <p>Compared with last year's model, standby drain dropped by roughly 8 percent in our measurements.</p>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li>Best phone cases of the year</li>
            <li>Subscribe to our newsletter</li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024. All rights reserved.</p>
    </footer>
</body>
</html>
"#;

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_passages", |b| {
        b.iter(|| extract_passages(black_box(SAMPLE_HTML)));
    });
}

fn bench_gate_and_score(c: &mut Criterion) {
    let query = Query::parse("iphone 15 battery life").unwrap();
    let trust = DomainTrustTable::builtin();
    let scorer = RelevanceScorer::new(&query, ScoringWeights::default(), trust);
    let gate = QualityGate::default();
    let passages = extract_passages(SAMPLE_HTML);

    c.bench_function("gate_and_score", |b| {
        b.iter(|| {
            passages
                .iter()
                .filter(|p| gate.passes(p))
                .map(|p| scorer.score(black_box(p), "theverge.com").final_score)
                .sum::<f64>()
        });
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let hosts = ["apple.com", "theverge.com", "randomblog.io", "reddit.com", "bbc.com"];
    let pieces: Vec<ContentPiece> = (0..50)
        .map(|i| ContentPiece {
            text: format!("Battery passage number {i} about charging speed and standby drain."),
            source_host: hosts[i % hosts.len()].to_string(),
            relevance_score: f64::from(u32::try_from(i % 7).unwrap_or(0)) / 7.0,
            discovery_index: i,
        })
        .collect();
    let trust = DomainTrustTable::builtin();
    let limits = AggregateLimits::default();

    c.bench_function("aggregate_50_pieces", |b| {
        b.iter(|| aggregate(black_box(&pieces), trust, &limits));
    });
}

/// Extraction over pages of increasing size
fn bench_scaled_pages(c: &mut Criterion) {
    let paragraph = "<p>Battery life depends on screen brightness, background refresh and signal strength, so results vary between 14 and 22 hours.</p>\n";
    let mut group = c.benchmark_group("scaled");

    for count in [10usize, 100, 500] {
        let html = format!("<html><body><article>{}</article></body></html>", paragraph.repeat(count));
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", count), &html, |b, html| {
            b.iter(|| extract_passages(black_box(html)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract,
    bench_gate_and_score,
    bench_aggregate,
    bench_scaled_pages
);
criterion_main!(benches);
