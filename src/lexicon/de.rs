//! German tables.

/// German stop words dropped before scoring and keyword ranking.
pub static STOP_WORDS: &[&str] = &[
    "aber", "alle", "als", "also", "am", "an", "auch", "auf", "aus", "bei", "bin", "bis",
    "bist", "da", "damit", "dann", "das", "dass", "dem", "den", "der", "des", "die",
    "dies", "diese", "dieser", "dieses", "doch", "dort", "du", "durch", "ein", "eine",
    "einem", "einen", "einer", "eines", "er", "es", "für", "hat", "hatte", "hier", "ich",
    "ihr", "ihre", "im", "in", "ist", "ja", "jetzt", "kann", "kein", "keine", "man",
    "mehr", "mit", "nach", "nicht", "noch", "nur", "oder", "ohne", "sehr", "sein", "seine",
    "sich", "sie", "sind", "so", "über", "um", "und", "uns", "unter", "vom", "von", "vor",
    "war", "waren", "was", "weil", "wenn", "wer", "wie", "wir", "wird", "wo", "zu", "zum",
    "zur",
];

/// Phrases signalling reasoning or sourced claims.
pub static CONNECTIVES: &[&str] = &[
    "weil",
    "deshalb",
    "daher",
    "laut",
    "studie",
    "forschung",
    "ergebnisse",
    "prozent",
];
