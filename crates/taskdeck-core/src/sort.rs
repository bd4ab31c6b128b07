use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};
use time::Date;

use crate::task::{ParseFieldError, Task};

/// Key the canonical collection is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Descending priority rank, ties keep their relative order.
    #[default]
    Priority,
    /// Ascending due date, dateless tasks after every dated one.
    DueDate,
}

impl SortKey {
    /// The other sort key.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Priority,
        }
    }

    /// Token used in configuration and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due_date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "priority" => Ok(Self::Priority),
            "due_date" | "duedate" | "due" => Ok(Self::DueDate),
            _ => Err(ParseFieldError::new("sort key", s)),
        }
    }
}

/// Stable in-place sort of `tasks` by `key`.
///
/// Total and deterministic over (collection, key): equal elements keep the
/// order they had before the call.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::DueDate => tasks.sort_by(|a, b| due_date_order(a.due_date, b.due_date)),
    }
}

fn due_date_order(a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
