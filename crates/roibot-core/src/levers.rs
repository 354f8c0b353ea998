//! Lever ranking by use-case overlap

use serde::Serialize;

use crate::catalog::{LeverCatalog, LeverMeta};

/// Number of ranked levers shown in an answer
pub const TOP_LEVERS: usize = 5;

/// A lever with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedLever<'a> {
    pub id: &'a str,
    pub meta: &'a LeverMeta,
    /// Number of the lever's use cases present in the input
    pub score: usize,
}

/// Rank levers by how many of their use cases appear in `use_cases`.
///
/// Levers with no overlap are dropped. Ties on score are ordered by label
/// (byte-wise, case-sensitive); full ties keep catalog order.
pub fn rank_levers<'a>(use_cases: &[String], levers: &'a LeverCatalog) -> Vec<RankedLever<'a>> {
    let mut ranked: Vec<RankedLever<'a>> = levers
        .iter()
        .map(|(id, meta)| RankedLever {
            id: id.as_str(),
            meta,
            score: meta
                .use_cases
                .iter()
                .filter(|u| use_cases.contains(u))
                .count(),
        })
        .filter(|lever| lever.score > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.meta.label.cmp(&b.meta.label))
    });

    ranked
}
