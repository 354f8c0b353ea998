//! Customer story retrieval

use crate::catalog::CustomerStory;

/// Default number of stories returned
pub const DEFAULT_STORY_LIMIT: usize = 3;

/// Stories tagged with any of `use_cases`, in catalog order, at most `limit`
pub fn find_stories<'a>(
    use_cases: &[String],
    stories: &'a [CustomerStory],
    limit: usize,
) -> Vec<&'a CustomerStory> {
    stories
        .iter()
        .filter(|s| use_cases.contains(&s.use_case))
        .take(limit)
        .collect()
}
