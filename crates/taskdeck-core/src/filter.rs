use time::Date;

use crate::task::{Priority, Status, Task};
use crate::text_matcher::TextMatcher;

/// Conjunction of optional per-field constraints over the task collection.
///
/// An unset field means "no constraint"; an entirely empty filter passes
/// every task through unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    text: Option<TextMatcher>,
    priority: Option<Priority>,
    due_date: Option<Date>,
    status: Option<Status>,
}

impl TaskFilter {
    /// Start building a filter from user-facing inputs.
    #[must_use]
    pub fn builder() -> TaskFilterBuilder {
        TaskFilterBuilder::default()
    }

    /// True when no constraint is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.priority.is_none() && self.due_date.is_none() && self.status.is_none()
    }

    /// Whether `task` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.text.as_ref().is_none_or(|matcher| matcher.matches(task))
            && self.priority.is_none_or(|p| p == task.priority)
            && self.due_date.is_none_or(|d| task.due_date == Some(d))
            && self.status.is_none_or(|s| s == task.status)
    }

    /// Borrowing subsequence of `tasks` in their current order.
    ///
    /// Never mutates the collection; it is applied after sorting, on the
    /// canonical order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Builder that normalizes user-facing inputs into a [`TaskFilter`].
#[derive(Debug, Clone, Default)]
pub struct TaskFilterBuilder {
    text: Option<String>,
    priority: Option<Priority>,
    due_date: Option<Date>,
    status: Option<Status>,
}

impl TaskFilterBuilder {
    /// Configure the search text (blank or whitespace-only inputs become no constraint).
    #[must_use]
    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text.and_then(|raw| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        });
        self
    }

    /// Require an exact priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    /// Require an exact due date (a date match, not a range).
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<Date>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Require an exact status.
    #[must_use]
    pub const fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    /// Build the final [`TaskFilter`].
    #[must_use]
    pub fn build(self) -> TaskFilter {
        TaskFilter {
            text: self.text.as_deref().and_then(TextMatcher::new),
            priority: self.priority,
            due_date: self.due_date,
            status: self.status,
        }
    }
}
