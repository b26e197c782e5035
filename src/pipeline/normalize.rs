//! Condition-text canonicalisation.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]").expect("valid regex"));
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9%.\- ]+").expect("valid regex"));

/// Lower-case a condition description and restrict it to `[a-z0-9%.\- ]`.
///
/// Each carriage return or newline becomes one space before the character
/// filter runs, so line-wrapped comments stay word-separated. Total and
/// idempotent; never fails.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let unwrapped = LINE_BREAKS.replace_all(&lowered, " ");
    DISALLOWED.replace_all(&unwrapped, "").into_owned()
}
