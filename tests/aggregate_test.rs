use search_digest::{aggregate, AggregateLimits, ContentPiece, DomainTrustTable};

fn piece(text: &str, host: &str, score: f64, index: usize) -> ContentPiece {
    ContentPiece {
        text: text.to_string(),
        source_host: host.to_string(),
        relevance_score: score,
        discovery_index: index,
    }
}

fn sample() -> Vec<ContentPiece> {
    let hosts = ["apple.com", "theverge.com", "randomblog.io", "reddit.com", "bbc.com", "news.bbc.com"];
    (0..24)
        .map(|i| {
            let score = f64::from(u32::try_from((i * 7) % 11).unwrap()) / 10.0;
            piece(
                &format!("Battery passage {i} about charging speed and standby drain."),
                hosts[i % hosts.len()],
                score,
                i,
            )
        })
        .collect()
}

#[test]
fn aggregating_retained_pieces_again_changes_nothing() {
    let trust = DomainTrustTable::builtin();
    let limits = AggregateLimits::default();

    let once = aggregate(&sample(), trust, &limits);
    let retained: Vec<ContentPiece> = once.pieces().cloned().collect();
    let twice = aggregate(&retained, trust, &limits);

    assert_eq!(once, twice);
}

#[test]
fn caps_are_respected() {
    let digest = aggregate(&sample(), DomainTrustTable::builtin(), &AggregateLimits::default());

    assert_eq!(digest.groups.len(), 4);
    assert!(digest.groups.iter().all(|g| g.pieces.len() <= 3));
    assert!(digest.keywords.len() <= 12);
    for pair in digest.groups.windows(2) {
        assert!(pair[0].rank_score >= pair[1].rank_score);
    }
}

#[test]
fn input_order_does_not_change_the_result() {
    let trust = DomainTrustTable::builtin();
    let limits = AggregateLimits::default();

    let forward = aggregate(&sample(), trust, &limits);
    let mut reversed = sample();
    reversed.reverse();
    let backward = aggregate(&reversed, trust, &limits);

    assert_eq!(forward.groups, backward.groups);
}
