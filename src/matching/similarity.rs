//! Fuzzy similarity scoring.
//!
//! Jaro-Winkler gives extra weight to a shared prefix, which suits short
//! place names with trailing typos.

/// Minimum score for a fuzzy candidate to be accepted as a match.
pub const FUZZY_THRESHOLD: f64 = 0.88;

/// Similarity between two normalized strings, in `[0, 1]`.
#[inline]
pub fn score(address: &str, keyword: &str) -> f64 {
    strsim::jaro_winkler(address, keyword)
}

/// Whether a fuzzy score clears the acceptance threshold (inclusive).
#[inline]
pub fn accepts(score: f64) -> bool {
    score >= FUZZY_THRESHOLD
}
