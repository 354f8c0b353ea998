//! Loading the knowledge base from a directory of JSON documents

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::KnowledgeBase;

pub const PROBLEM_TO_USE_CASES_FILE: &str = "problemToUseCases.json";
pub const PROBLEM_SYNONYMS_FILE: &str = "problemSynonyms.json";
pub const LEVER_CATALOG_FILE: &str = "leverCatalog.json";
pub const CUSTOMER_STORIES_FILE: &str = "customerStories.json";

impl KnowledgeBase {
    /// Load all four catalogs from `dir`.
    ///
    /// Never fails: a missing or unparsable file degrades to an empty
    /// catalog and is reported at warn level.
    pub fn load_dir(dir: &Path) -> Self {
        let kb = Self {
            problems: load_or_default(dir, PROBLEM_TO_USE_CASES_FILE),
            synonyms: load_or_default(dir, PROBLEM_SYNONYMS_FILE),
            levers: load_or_default(dir, LEVER_CATALOG_FILE),
            stories: load_or_default(dir, CUSTOMER_STORIES_FILE),
        };

        let counts = kb.counts();
        tracing::info!(
            dir = %dir.display(),
            problems = counts.problems,
            synonyms = counts.synonyms,
            levers = counts.levers,
            stories = counts.stories,
            "kb_loaded"
        );

        kb
    }
}

fn load_or_default<T: DeserializeOwned + Default>(dir: &Path, file: &str) -> T {
    let path = dir.join(file);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "kb file unavailable; using empty catalog");
            return T::default();
        }
    };

    parse_or_default(file, &content)
}

/// Parse a catalog document, falling back to an empty catalog on error
pub(super) fn parse_or_default<T: DeserializeOwned + Default>(name: &str, content: &str) -> T {
    serde_json::from_str(content).unwrap_or_else(|e| {
        tracing::warn!(file = name, error = %e, "kb file invalid; using empty catalog");
        T::default()
    })
}
