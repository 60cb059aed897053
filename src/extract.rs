//! Capture-group extraction over game payloads
//!
//! The remote service is only knowable through its rendered text, so every
//! mission outcome is read back with a capture-group pattern. Patterns are
//! applied with dot-matches-newline semantics: matches may span line
//! boundaries anywhere in the payload.

use regex::Regex;
use tracing::warn;

/// Default pattern: the first message line the game renders after an action.
pub const DEFAULT_PATTERN: &str = r"<br />(.*?)<";

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("(?s){pattern}")) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "invalid extraction pattern");
            None
        }
    }
}

/// First capture group matched in `payload`, or `None` when the pattern
/// does not match. No match is a valid, expected outcome.
pub fn first_capture(pattern: &str, payload: &str) -> Option<String> {
    let re = compile(pattern)?;
    re.captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Every capture-group match in document order; empty when none.
pub fn all_captures(pattern: &str, payload: &str) -> Vec<String> {
    let Some(re) = compile(pattern) else {
        return Vec::new();
    };
    re.captures_iter(payload)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
