//! Answer text composition

use crate::catalog::CustomerStory;
use crate::levers::{RankedLever, TOP_LEVERS};

/// Reply when the knowledge base has nothing for the prompt
pub const NO_MATCH_MESSAGE: &str = "I didn’t find a match in the Pendo ROI knowledge yet. Try naming a known problem (e.g., “Low adoption”, “Churn risk”), or expand the in-house mappings.";

/// Closing line appended to any answer with content
pub const FOLLOW_UP_MESSAGE: &str = "If you'd like, I can expand on any of the above.";

/// Compose the answer text.
///
/// Each section appears only when its source is non-empty; sections are
/// separated by a blank line.
pub fn compose(
    problem: Option<&str>,
    use_cases: &[String],
    levers: &[RankedLever<'_>],
    stories: &[&CustomerStory],
) -> String {
    let mut sections = Vec::new();

    if let Some(problem) = problem {
        sections.push(format!("I detected the problem: **{problem}**."));
    }

    if !use_cases.is_empty() {
        let lines: Vec<String> = use_cases.iter().map(|u| format!("• {u}")).collect();
        sections.push(format!("Recommended use cases:\n{}", lines.join("\n")));
    }

    if !levers.is_empty() {
        let lines: Vec<String> = levers
            .iter()
            .take(TOP_LEVERS)
            .map(|lever| {
                let modules = if lever.meta.modules.is_empty() {
                    "—".to_string()
                } else {
                    lever.meta.modules.join(", ")
                };
                format!("• {}  —  Modules: {}", lever.meta.label, modules)
            })
            .collect();
        sections.push(format!("Value levers to consider:\n{}", lines.join("\n")));
    }

    if !stories.is_empty() {
        let lines: Vec<String> = stories
            .iter()
            .map(|s| format!("• {}: {}  ({})", s.customer, s.story, s.url))
            .collect();
        sections.push(format!("Relevant customer stories:\n{}", lines.join("\n")));
    }

    if use_cases.is_empty() && levers.is_empty() && stories.is_empty() {
        sections.push(NO_MATCH_MESSAGE.to_string());
    } else {
        sections.push(FOLLOW_UP_MESSAGE.to_string());
    }

    sections.join("\n\n")
}
