//! Seed knowledge base embedded at compile time

use super::load::parse_or_default;
use super::{
    KnowledgeBase, CUSTOMER_STORIES_FILE, LEVER_CATALOG_FILE, PROBLEM_SYNONYMS_FILE,
    PROBLEM_TO_USE_CASES_FILE,
};

const SEED_PROBLEM_TO_USE_CASES: &str = include_str!("../../kb/problemToUseCases.json");
const SEED_PROBLEM_SYNONYMS: &str = include_str!("../../kb/problemSynonyms.json");
const SEED_LEVER_CATALOG: &str = include_str!("../../kb/leverCatalog.json");
const SEED_CUSTOMER_STORIES: &str = include_str!("../../kb/customerStories.json");

impl KnowledgeBase {
    /// The knowledge base shipped with the crate
    pub fn seed() -> Self {
        Self {
            problems: parse_or_default(PROBLEM_TO_USE_CASES_FILE, SEED_PROBLEM_TO_USE_CASES),
            synonyms: parse_or_default(PROBLEM_SYNONYMS_FILE, SEED_PROBLEM_SYNONYMS),
            levers: parse_or_default(LEVER_CATALOG_FILE, SEED_LEVER_CATALOG),
            stories: parse_or_default(CUSTOMER_STORIES_FILE, SEED_CUSTOMER_STORIES),
        }
    }
}
