//! Domain types & pure query logic for taskdeck.

/// Conjunctive filtering over the task collection.
pub mod filter;
/// Identifier types and generation.
pub mod id;
/// Sort keys and the canonical-order sort.
pub mod sort;
/// Derived statistics projection.
pub mod stats;
/// The task entity and its field enums.
pub mod task;
/// Case-insensitive substring matching.
pub mod text_matcher;

pub use filter::{TaskFilter, TaskFilterBuilder};
pub use id::{TaskId, TaskIdGenerator};
pub use sort::{SortKey, sort_tasks};
pub use stats::TaskStats;
pub use task::{ParseFieldError, Priority, Status, Task, format_date, parse_date};
pub use text_matcher::TextMatcher;
