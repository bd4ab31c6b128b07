use crate::task::Task;

/// Case-insensitive substring matcher for task text fields.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Determine whether the task title or description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title) || self.matches_field(&task.description)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::task::{Priority, Status};

    fn task(title: &str, description: &str) -> Task {
        Task {
            id: TaskId(1),
            title: title.into(),
            description: description.into(),
            priority: Priority::Medium,
            due_date: None,
            status: Status::Pending,
        }
    }

    #[test]
    fn matcher_skips_blank_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::new("\n").is_none());
    }

    #[test]
    fn matcher_searches_title_and_description() {
        let sample = task("Ship the release", "cut a tag first");
        let matcher = TextMatcher::new("release")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&sample));

        let matcher =
            TextMatcher::new("TAG").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&sample));

        let missing =
            TextMatcher::new("deploy").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!missing.matches(&sample));
    }

    #[test]
    fn matcher_is_case_insensitive_both_ways() {
        let sample = task("Improve CLI", "");
        let matcher =
            TextMatcher::new("cli").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&sample));

        let sample = task("fix lowercase bug", "");
        let matcher =
            TextMatcher::new("LOWERCASE").unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&sample));
    }
}
