//! Address text normalization.
//!
//! Applied identically to address text and zone keywords so every
//! comparison is normalized-vs-normalized:
//! - Unicode NFKD decomposition
//! - Combining marks (diacritics) dropped
//! - Lowercase
//! - Non-alphanumeric characters become word breaks
//! - Whitespace collapsed and trimmed

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw text for keyword comparison.
///
/// Pure and idempotent. Any input, including the empty string, has a
/// normalized form.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_break = false;

    let folded = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase);

    for c in folded {
        if c.is_alphanumeric() {
            if pending_break && !out.is_empty() {
                out.push(' ');
            }
            pending_break = false;
            out.push(c);
        } else {
            pending_break = true;
        }
    }

    out
}
