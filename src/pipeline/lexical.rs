//! Lexical condition-comment signals feeding the reduction input block.
//!
//! Patterns run against the raw comment, not the normalized one: the
//! fitted reducer observed exactly that input, and the word boundaries and
//! punctuation context differ once the normalizer has run. Keep the two
//! code paths distinct.

use once_cell::sync::Lazy;
use regex::Regex;

/// Presence terms, one 0/1 flag each, in fitted column order.
const PRESENCE_TERMS: [&str; 13] = [
    "glacial",
    "fuming",
    "aerated",
    "deaerated",
    "agitated",
    "static",
    "stagnant",
    "immersed",
    "vapou?r",
    "dilute",
    "concentrated",
    "saturated",
    "boiling",
];

/// Quantity patterns; group 1 captures the numeric literal.
const QUANTITY_PATTERNS: [&str; 6] = [
    r"(?i)\bph\s*[:=]?\s*(\d+(?:\.\d+)?)",
    r"(?i)(\d+(?:\.\d+)?)\s*ppm\s*(?:of\s+)?cl\b",
    r"(?i)(\d+(?:\.\d+)?)\s*ppm\s*(?:of\s+)?o2\b",
    r"(?i)(\d+(?:\.\d+)?)\s*%\s*nacl\b",
    r"(?i)(\d+(?:\.\d+)?)\s*%\s*hcl\b",
    r"(?i)(\d+(?:\.\d+)?)\s*%\s*h2so4\b",
];

/// Ordered column names of the lexical block. Variants that fold this
/// block into the reduction input were fitted on exactly this order.
pub const COLUMNS: [&str; 19] = [
    "lex_glacial",
    "lex_fuming",
    "lex_aerated",
    "lex_deaerated",
    "lex_agitated",
    "lex_static",
    "lex_stagnant",
    "lex_immersed",
    "lex_vapor",
    "lex_dilute",
    "lex_concentrated",
    "lex_saturated",
    "lex_boiling",
    "lex_ph",
    "lex_cl_ppm",
    "lex_o2_ppm",
    "lex_nacl_pct",
    "lex_hcl_pct",
    "lex_h2so4_pct",
];

static PRESENCE: Lazy<Vec<Regex>> = Lazy::new(|| {
    PRESENCE_TERMS
        .iter()
        .map(|term| Regex::new(&format!(r"(?i)\b{term}\b")).expect("valid regex"))
        .collect()
});

static QUANTITIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    QUANTITY_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid regex"))
        .collect()
});

/// Fixed-order lexical feature values; missing quantities are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalFeatures {
    values: [f64; COLUMNS.len()],
}

impl LexicalFeatures {
    /// Values in [`COLUMNS`] order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|idx| self.values[idx])
    }
}

/// Scan the raw comment for every fitted lexical signal.
///
/// Total function: an absent pattern yields a 0 flag or a NaN quantity,
/// never an error.
pub fn extract(comment: &str) -> LexicalFeatures {
    let mut values = [0.0; COLUMNS.len()];
    for (idx, pattern) in PRESENCE.iter().enumerate() {
        values[idx] = if pattern.is_match(comment) { 1.0 } else { 0.0 };
    }
    for (idx, pattern) in QUANTITIES.iter().enumerate() {
        values[PRESENCE_TERMS.len() + idx] = pattern
            .captures(comment)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(f64::NAN);
    }
    LexicalFeatures { values }
}
