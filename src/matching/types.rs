//! Match result types.

use serde::{Deserialize, Serialize};

/// Explanation returned with every no-match outcome.
pub const NO_MATCH_MESSAGE: &str =
    "We could not match your address to a delivery zone. Did you mean one of these?";

/// Maximum number of suggestions returned on no-match.
pub const MAX_SUGGESTIONS: usize = 3;

/// How a zone was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedBy {
    /// A keyword occurred verbatim in the normalized address.
    Exact,
    /// A keyword was similar enough to the whole address.
    Fuzzy,
}

impl MatchedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedBy::Exact => "exact",
            MatchedBy::Fuzzy => "fuzzy",
        }
    }
}

/// A resolved delivery zone for an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub zone_id: i64,
    pub zone_name: String,
    /// The catalog keyword that won, as written in the catalog.
    pub matched_keyword: String,
    pub matched_by: MatchedBy,
    /// 1.0 for exact matches, the similarity score otherwise.
    pub confidence: f64,
    /// Delivery price in minor currency units.
    pub price: i64,
}

/// A ranked alternative offered when no zone matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub zone_id: i64,
    pub keyword: String,
    pub price: i64,
    pub confidence: f64,
}

/// Explanation plus at most [`MAX_SUGGESTIONS`] ranked alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoMatchResult {
    pub message: String,
    pub suggestions: Vec<Suggestion>,
}

/// Outcome of matching one address. Exactly one variant, always.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(MatchResult),
    NoMatch(NoMatchResult),
}

impl MatchOutcome {
    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Matched(m) => m.matched_by.as_str(),
            MatchOutcome::NoMatch(_) => "no_match",
        }
    }

    pub fn matched(&self) -> Option<&MatchResult> {
        match self {
            MatchOutcome::Matched(m) => Some(m),
            MatchOutcome::NoMatch(_) => None,
        }
    }
}
