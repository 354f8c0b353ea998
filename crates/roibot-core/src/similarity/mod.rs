//! Token-set similarity measures used by the problem matcher

use std::collections::HashSet;

use crate::text::token_set;

/// Jaccard similarity of the token sets of two strings.
///
/// An empty union is treated as a denominator of 1, so two empty inputs
/// score 0.
pub fn jaccard(a: &str, b: &str) -> f64 {
    jaccard_sets(&token_set(a), &token_set(b))
}

/// Jaccard similarity of two already-tokenized sets
pub fn jaccard_sets(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count().max(1);
    intersection as f64 / union as f64
}

/// Fraction of candidate tokens that also appear in the prompt
pub fn token_overlap(candidate: &HashSet<String>, prompt: &HashSet<String>) -> f64 {
    let hits = candidate.iter().filter(|t| prompt.contains(*t)).count();
    hits as f64 / candidate.len().max(1) as f64
}
