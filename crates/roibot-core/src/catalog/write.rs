//! Emitting the knowledge base as JSON documents

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{
    KbCounts, KnowledgeBase, CUSTOMER_STORIES_FILE, LEVER_CATALOG_FILE, PROBLEM_SYNONYMS_FILE,
    PROBLEM_TO_USE_CASES_FILE,
};
use crate::error::{Result, RoiError};

impl KnowledgeBase {
    /// Write the four catalogs into `dir`, creating it if needed.
    ///
    /// Output is pretty-printed with a trailing newline and keeps catalog
    /// order, so `load_dir` on the result reproduces this knowledge base.
    pub fn write_dir(&self, dir: &Path) -> Result<KbCounts> {
        fs::create_dir_all(dir).map_err(|e| RoiError::kb_write(dir, e))?;

        write_json(dir, PROBLEM_TO_USE_CASES_FILE, &self.problems)?;
        write_json(dir, PROBLEM_SYNONYMS_FILE, &self.synonyms)?;
        write_json(dir, LEVER_CATALOG_FILE, &self.levers)?;
        write_json(dir, CUSTOMER_STORIES_FILE, &self.stories)?;

        Ok(self.counts())
    }
}

fn write_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> Result<()> {
    let path = dir.join(file);
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(&path, content).map_err(|e| RoiError::kb_write(&path, e))?;
    tracing::debug!(path = %path.display(), "kb_file_written");
    Ok(())
}
