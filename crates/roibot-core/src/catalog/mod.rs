//! Knowledge base catalogs
//!
//! Four read-only catalogs feed the matching pipeline:
//! - problems: canonical problem label -> use-case labels
//! - synonyms: canonical problem label -> alternate phrasings
//! - levers: lever id -> label, modules and related use cases
//! - stories: customer stories tagged with a use case
//!
//! All maps keep the insertion order of their JSON source, since matching
//! and ranking ties are resolved by catalog order.

mod load;
mod seed;
mod write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use load::{
    CUSTOMER_STORIES_FILE, LEVER_CATALOG_FILE, PROBLEM_SYNONYMS_FILE, PROBLEM_TO_USE_CASES_FILE,
};

/// Canonical problem label -> ordered use-case labels
pub type ProblemCatalog = IndexMap<String, Vec<String>>;

/// Canonical problem label -> alternate free-text phrasings
pub type SynonymCatalog = IndexMap<String, Vec<String>>;

/// Lever id -> lever metadata
pub type LeverCatalog = IndexMap<String, LeverMeta>;

/// Ordered customer stories
pub type StoryCatalog = Vec<CustomerStory>;

/// Metadata for a value lever
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverMeta {
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Primary business outcome tag (rev, cost, risk, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pbo: Option<String>,
    /// Product modules the lever relies on
    #[serde(default)]
    pub modules: Vec<String>,
    /// Use cases the lever contributes to
    #[serde(default, rename = "useCases")]
    pub use_cases: Vec<String>,
}

/// A customer story record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStory {
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub use_case: String,
    #[serde(default)]
    pub results: String,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub url: String,
}

/// Catalog sizes, as reported by the health endpoint and `kb stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KbCounts {
    pub problems: usize,
    pub levers: usize,
    pub stories: usize,
    /// Total number of synonym phrases across all problems
    pub synonyms: usize,
}

/// The full in-memory knowledge base
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    pub problems: ProblemCatalog,
    pub synonyms: SynonymCatalog,
    pub levers: LeverCatalog,
    pub stories: StoryCatalog,
}

impl KnowledgeBase {
    /// An empty knowledge base; every query yields no match
    pub fn empty() -> Self {
        Self::default()
    }

    /// Use cases registered for a problem label (empty when unknown)
    pub fn use_cases_for(&self, problem: &str) -> &[String] {
        self.problems
            .get(problem)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Catalog sizes
    pub fn counts(&self) -> KbCounts {
        KbCounts {
            problems: self.problems.len(),
            levers: self.levers.len(),
            stories: self.stories.len(),
            synonyms: self.synonyms.values().map(Vec::len).sum(),
        }
    }
}
