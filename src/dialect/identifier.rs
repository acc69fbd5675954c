//! Identifier and reserved-word handling.
//!
//! Each dialect owns its reserved-word set; the check never runs against a
//! shared set because the collision rules differ per system. All folding and
//! quoting helpers are idempotent so an already-folded identifier passes
//! through unchanged.

use std::collections::HashSet;

/// Build a lookup set from a static word list. Words are stored upper-case;
/// lookups are case-insensitive.
pub fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

/// Whether an identifier collides with a reserved word (case-insensitive).
pub fn is_reserved(words: &HashSet<&'static str>, identifier: &str) -> bool {
    // Strip quoting so a pre-quoted identifier still matches
    let bare = identifier
        .trim_matches('"')
        .trim_matches('`')
        .to_ascii_uppercase();
    words.contains(bare.as_str())
}

/// Upper-case fold. Idempotent by nature.
pub fn fold_upper(identifier: &str) -> String {
    identifier.to_ascii_uppercase()
}

/// Wrap in double quotes unless already wrapped.
pub fn quote_double(identifier: &str) -> String {
    if identifier.starts_with('"') && identifier.ends_with('"') && identifier.len() >= 2 {
        identifier.to_string()
    } else {
        format!("\"{}\"", identifier)
    }
}

/// Wrap in backticks unless already wrapped.
pub fn quote_backtick(identifier: &str) -> String {
    if identifier.starts_with('`') && identifier.ends_with('`') && identifier.len() >= 2 {
        identifier.to_string()
    } else {
        format!("`{}`", identifier)
    }
}
