//! English tables.

/// English stop words dropped before scoring and keyword ranking.
pub static STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "cannot", "could", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "even", "ever", "every", "few",
    "for", "from", "further", "get", "gets", "got", "had", "has", "have", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
    "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "let", "like",
    "made", "make", "many", "may", "me", "might", "more", "most", "much", "must", "my",
    "myself", "never", "new", "no", "nor", "not", "now", "of", "off", "on", "once", "one",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "per", "same",
    "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "upon", "us", "use", "used", "using",
    "very", "via", "was", "wasn't", "way", "we", "well", "were", "what", "when", "where",
    "whether", "which", "while", "who", "whom", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Phrases signalling reasoning or sourced claims.
pub static CONNECTIVES: &[&str] = &[
    "because",
    "therefore",
    "thus",
    "according to",
    "research",
    "study",
    "studies",
    "survey",
    "evidence",
    "results",
    "found that",
    "shows that",
    "measured",
    "percent",
    "compared to",
    "due to",
    "as a result",
];
