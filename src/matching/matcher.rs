//! Address-to-zone matching engine.
//!
//! # Phases (first success wins)
//! ```text
//! normalized address
//!     → exact:   keyword is a substring of the address; longest keyword wins
//!     → fuzzy:   Jaro-Winkler >= FUZZY_THRESHOLD; highest score, then longest keyword
//!     → no-match: every keyword scored, top MAX_SUGGESTIONS returned
//! ```
//!
//! # Design Decisions
//! - Owns its catalog; immutable after construction (shared without locks)
//! - No I/O and no error return: every address yields exactly one outcome
//! - Remaining ties resolve to the first keyword in catalog order

use std::cmp::Ordering;

use crate::matching::normalize::normalize;
use crate::matching::similarity::{accepts, score};
use crate::matching::types::{
    MatchOutcome, MatchResult, MatchedBy, NoMatchResult, Suggestion, MAX_SUGGESTIONS,
    NO_MATCH_MESSAGE,
};
use crate::zones::{Keyword, Zone, ZoneCatalog};

/// A keyword of a zone together with its score against the address.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    zone: &'a Zone,
    keyword: &'a Keyword,
    score: f64,
}

impl<'a> Candidate<'a> {
    /// Strictly better by score, then by keyword length.
    ///
    /// Equal candidates are not better, which keeps the earlier one.
    fn beats(&self, other: &Candidate<'a>) -> bool {
        ranking(self, other) == Ordering::Less
    }

    fn into_match(self, matched_by: MatchedBy) -> MatchResult {
        MatchResult {
            zone_id: self.zone.id,
            zone_name: self.zone.name.clone(),
            matched_keyword: self.keyword.raw.clone(),
            matched_by,
            confidence: self.score,
            price: self.zone.price,
        }
    }

    fn into_suggestion(self) -> Suggestion {
        Suggestion {
            zone_id: self.zone.id,
            keyword: self.keyword.raw.clone(),
            price: self.zone.price,
            confidence: self.score,
        }
    }
}

/// Descending by score, then descending by keyword length.
fn ranking(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.keyword.len.cmp(&a.keyword.len))
}

/// Resolves free-text addresses to delivery zones.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    catalog: ZoneCatalog,
}

impl Matcher {
    /// Create a matcher owning the given catalog.
    pub fn new(catalog: ZoneCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    /// Match a raw address against the catalog.
    pub fn match_address(&self, raw_address: &str) -> MatchOutcome {
        let address = normalize(raw_address);

        if let Some(best) = self.exact_match(&address) {
            return MatchOutcome::Matched(best.into_match(MatchedBy::Exact));
        }

        // Scored once, shared by the fuzzy pass and the suggestions.
        let candidates = self.scored(&address);

        if let Some(best) = fuzzy_match(&candidates) {
            return MatchOutcome::Matched(best.into_match(MatchedBy::Fuzzy));
        }

        MatchOutcome::NoMatch(suggest(candidates))
    }

    fn keywords(&self) -> impl Iterator<Item = (&Zone, &Keyword)> {
        self.catalog
            .zones()
            .iter()
            .flat_map(|zone| zone.keywords.iter().map(move |keyword| (zone, keyword)))
    }

    /// Longest keyword occurring verbatim in the address.
    fn exact_match(&self, address: &str) -> Option<Candidate<'_>> {
        let mut best: Option<Candidate<'_>> = None;

        for (zone, keyword) in self.keywords() {
            if keyword.normalized.is_empty() || !address.contains(keyword.normalized.as_str()) {
                continue;
            }
            if best.map_or(true, |b| keyword.len > b.keyword.len) {
                best = Some(Candidate {
                    zone,
                    keyword,
                    score: 1.0,
                });
            }
        }

        best
    }

    /// Every keyword scored against the address, in catalog order.
    fn scored(&self, address: &str) -> Vec<Candidate<'_>> {
        self.keywords()
            .map(|(zone, keyword)| Candidate {
                zone,
                keyword,
                score: score(address, &keyword.normalized),
            })
            .collect()
    }
}

/// Best candidate whose similarity clears the threshold.
fn fuzzy_match<'a>(candidates: &[Candidate<'a>]) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;

    for candidate in candidates.iter().filter(|c| accepts(c.score)) {
        if best.as_ref().map_or(true, |b| candidate.beats(b)) {
            best = Some(*candidate);
        }
    }

    best
}

/// Top-ranked candidates regardless of threshold.
fn suggest(mut candidates: Vec<Candidate<'_>>) -> NoMatchResult {
    // Stable sort keeps catalog order for full ties.
    candidates.sort_by(ranking);
    candidates.truncate(MAX_SUGGESTIONS);

    NoMatchResult {
        message: NO_MATCH_MESSAGE.to_string(),
        suggestions: candidates
            .into_iter()
            .map(Candidate::into_suggestion)
            .collect(),
    }
}
