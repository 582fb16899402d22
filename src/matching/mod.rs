//! Address matching subsystem.
//!
//! # Data Flow
//! ```text
//! raw address text
//!     → normalize.rs (case, punctuation, whitespace, diacritics)
//!     → matcher.rs (exact pass, fuzzy pass, suggestions)
//!     → similarity.rs (Jaro-Winkler scoring, fixed threshold)
//!     → MatchOutcome: Matched(MatchResult) | NoMatch(NoMatchResult)
//! ```
//!
//! # Design Decisions
//! - Matching is a pure function of (normalized address, catalog)
//! - Deterministic: same input and catalog always give the same outcome
//! - The fuzzy threshold is a fixed constant, not a request parameter

pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod types;

pub use matcher::Matcher;
pub use normalize::normalize;
pub use similarity::FUZZY_THRESHOLD;
pub use types::{
    MatchOutcome, MatchResult, MatchedBy, NoMatchResult, Suggestion, MAX_SUGGESTIONS,
    NO_MATCH_MESSAGE,
};
