//! Domain tables: trust weights, denylists and the topical widening allowlist.

/// Built-in trust weights, in `[1.0, 5.0]`.
///
/// Entries are matched as host suffixes on label boundaries, so `gov` covers
/// every `*.gov` host and `bbc.com` covers `news.bbc.com`. The most specific
/// entry wins.
pub static TRUST_WEIGHTS: &[(&str, f64)] = &[
    // Reference and science
    ("wikipedia.org", 5.0),
    ("britannica.com", 4.5),
    ("nature.com", 5.0),
    ("science.org", 5.0),
    ("nih.gov", 5.0),
    ("who.int", 5.0),
    ("gov", 4.5),
    ("edu", 4.0),
    ("admin.ch", 4.5),
    // News agencies and broadcasters
    ("reuters.com", 4.5),
    ("apnews.com", 4.5),
    ("bbc.com", 4.5),
    ("bbc.co.uk", 4.5),
    ("nytimes.com", 4.0),
    ("theguardian.com", 4.0),
    ("srf.ch", 4.0),
    ("nzz.ch", 4.0),
    // Vendors and developer documentation
    ("apple.com", 5.0),
    ("microsoft.com", 4.5),
    ("google.com", 4.0),
    ("mozilla.org", 4.5),
    ("rust-lang.org", 4.5),
    ("python.org", 4.5),
    ("github.com", 4.0),
    ("stackoverflow.com", 4.0),
    // Technology press
    ("arstechnica.com", 3.5),
    ("theverge.com", 3.5),
    ("wired.com", 3.5),
    ("macrumors.com", 3.5),
    ("anandtech.com", 3.5),
    ("techcrunch.com", 3.0),
    ("engadget.com", 3.0),
    ("cnet.com", 3.0),
    // User-generated
    ("medium.com", 2.0),
    ("quora.com", 1.5),
];

/// Hosts never fetched: social networks, video platforms and ad servers.
pub static DENIED_DOMAINS: &[&str] = &[
    "facebook.com",
    "fb.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "tiktok.com",
    "linkedin.com",
    "pinterest.com",
    "snapchat.com",
    "youtube.com",
    "youtu.be",
    "doubleclick.net",
    "googleadservices.com",
    "googlesyndication.com",
    "amazon-adsystem.com",
    "duckduckgo.com",
];

/// Path segments of pages that hold no content worth scoring.
///
/// Matched against whole path segments, lowercased, with `_` read as `-` and
/// any file extension dropped; `/wiki/Legal_drinking_age` is not `legal`.
pub static DENIED_PATH_SEGMENTS: &[&str] = &[
    "login",
    "logout",
    "signin",
    "sign-in",
    "signup",
    "sign-up",
    "register",
    "account",
    "my-account",
    "privacy",
    "privacy-policy",
    "privacy-notice",
    "terms",
    "terms-of-service",
    "terms-of-use",
    "terms-and-conditions",
    "tos",
    "legal",
    "legal-notice",
    "impressum",
    "cookies",
    "cookie-policy",
    "advertise",
    "advertising",
    "ads",
    "sponsored",
    "checkout",
    "cart",
];

/// Sites added as `site:` filters when a technical query is widened.
pub static TECH_SITES: &[&str] = &[
    "stackoverflow.com",
    "github.com",
    "developer.mozilla.org",
    "arstechnica.com",
    "theverge.com",
    "wikipedia.org",
];

/// Query words that mark a query as technical.
pub static TECH_KEYWORDS: &[&str] = &[
    "api",
    "android",
    "code",
    "compiler",
    "cpu",
    "gpu",
    "hardware",
    "iphone",
    "javascript",
    "laptop",
    "linux",
    "processor",
    "programming",
    "python",
    "rust",
    "smartphone",
    "software",
    "windows",
];
