//! Problem matcher: maps a free-text prompt to a canonical problem label
//!
//! Matching runs in two passes over candidates compiled from the problem
//! catalog (canonical labels) and the synonym catalog (alternate phrasings):
//! - substring pass: the shortest candidate phrase that occurs literally in
//!   the normalized prompt wins outright
//! - fuzzy pass: token overlap blended with Jaccard similarity, scaled by the
//!   candidate's boost, accepted at or above [`MATCH_THRESHOLD`]

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{KnowledgeBase, ProblemCatalog, SynonymCatalog};
use crate::similarity::{jaccard_sets, token_overlap};
use crate::text::{normalize, token_set};

/// Boost applied to a canonical problem label
pub const CANONICAL_BOOST: f64 = 1.0;

/// Boost applied to a synonym phrase
pub const SYNONYM_BOOST: f64 = 0.95;

/// Minimum fuzzy score for a match
pub const MATCH_THRESHOLD: f64 = 0.28;

const OVERLAP_WEIGHT: f64 = 0.7;
const JACCARD_WEIGHT: f64 = 0.3;

/// A phrase that can identify a problem
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    /// Canonical problem label this phrase resolves to
    pub problem: &'a str,
    /// Normalized phrase
    pub phrase: String,
    /// Confidence boost (1.0 canonical, 0.95 synonym)
    pub boost: f64,
}

/// How a problem was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Substring,
    Fuzzy,
}

/// A successful problem match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemMatch<'a> {
    pub problem: &'a str,
    pub kind: MatchKind,
    /// Candidate phrase that produced the match
    pub phrase: String,
    /// 1.0 for substring matches, the fuzzy score otherwise
    pub score: f64,
}

/// Matches prompts against the problem and synonym catalogs
#[derive(Debug, Clone, Copy)]
pub struct ProblemMatcher<'a> {
    problems: &'a ProblemCatalog,
    synonyms: &'a SynonymCatalog,
}

impl<'a> ProblemMatcher<'a> {
    pub fn new(problems: &'a ProblemCatalog, synonyms: &'a SynonymCatalog) -> Self {
        Self { problems, synonyms }
    }

    pub fn from_kb(kb: &'a KnowledgeBase) -> Self {
        Self::new(&kb.problems, &kb.synonyms)
    }

    /// Compile candidates in catalog order: each label, then its synonyms.
    /// Phrases that normalize to nothing are skipped.
    pub fn candidates(&self) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::new();

        for key in self.problems.keys() {
            let base = normalize(key);
            if !base.is_empty() {
                candidates.push(Candidate {
                    problem: key.as_str(),
                    phrase: base,
                    boost: CANONICAL_BOOST,
                });
            }

            let synonyms = self.synonyms.get(key).map(Vec::as_slice).unwrap_or_default();
            for synonym in synonyms {
                let phrase = normalize(synonym);
                if !phrase.is_empty() {
                    candidates.push(Candidate {
                        problem: key.as_str(),
                        phrase,
                        boost: SYNONYM_BOOST,
                    });
                }
            }
        }

        candidates
    }

    /// Best-matching canonical problem label, or `None`
    pub fn find_problem(&self, prompt: &str) -> Option<&'a str> {
        self.find_match(prompt).map(|m| m.problem)
    }

    /// Like [`find_problem`](Self::find_problem), reporting how the match was made
    pub fn find_match(&self, prompt: &str) -> Option<ProblemMatch<'a>> {
        let normalized = normalize(prompt);
        let mut candidates = self.candidates();

        // Stable: equal-length phrases keep catalog order. The fuzzy pass
        // below also walks this sorted order, which decides score ties.
        candidates.sort_by_key(|c| c.phrase.len());

        if let Some(hit) = candidates
            .iter()
            .find(|c| normalized.contains(c.phrase.as_str()))
        {
            tracing::debug!(problem = hit.problem, phrase = %hit.phrase, "substring_match");
            return Some(ProblemMatch {
                problem: hit.problem,
                kind: MatchKind::Substring,
                phrase: hit.phrase.clone(),
                score: 1.0,
            });
        }

        let prompt_tokens = token_set(&normalized);
        let mut best: Option<(&Candidate<'a>, f64)> = None;
        let mut best_score = 0.0;

        for candidate in &candidates {
            let score = fuzzy_score(&token_set(&candidate.phrase), &prompt_tokens, candidate.boost);
            if score > best_score {
                best_score = score;
                best = Some((candidate, score));
            }
        }

        match best {
            Some((candidate, score)) if accepts(score) => {
                tracing::debug!(problem = candidate.problem, phrase = %candidate.phrase, score, "fuzzy_match");
                Some(ProblemMatch {
                    problem: candidate.problem,
                    kind: MatchKind::Fuzzy,
                    phrase: candidate.phrase.clone(),
                    score,
                })
            }
            _ => {
                tracing::debug!(best_score, "no_problem_match");
                None
            }
        }
    }
}

/// Fuzzy score of a candidate against a prompt, both as token sets
pub fn fuzzy_score(candidate: &HashSet<String>, prompt: &HashSet<String>, boost: f64) -> f64 {
    let overlap = token_overlap(candidate, prompt);
    let jac = jaccard_sets(candidate, prompt);
    (OVERLAP_WEIGHT * overlap + JACCARD_WEIGHT * jac) * boost
}

/// Whether a fuzzy score is high enough to count as a match
pub fn accepts(score: f64) -> bool {
    score >= MATCH_THRESHOLD
}
