//! Text normalization and tokenization for prompt matching

use std::collections::HashSet;

/// Canonical comparison form of a string.
///
/// Lowercases, replaces every character outside `[a-z0-9]` and whitespace
/// with a space, collapses whitespace runs and trims. Empty input yields an
/// empty string.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Set of whitespace-separated tokens of the normalized text
pub fn token_set(text: &str) -> HashSet<String> {
    normalize(text)
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
