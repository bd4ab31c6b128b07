use serde::Serialize;

use crate::task::Task;

/// Derived counters over the current collection.
///
/// Pure function of the collection; holds no state and is recomputed on
/// every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// Number of tasks in the collection.
    pub total: usize,
    /// Tasks marked completed.
    pub completed: usize,
    /// Tasks still pending.
    pub pending: usize,
    /// `round(100 * completed / total)`, or `0` for an empty collection.
    pub progress_percent: u8,
}

impl TaskStats {
    /// Compute the projection for `tasks`.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.status.is_completed()).count();
        Self {
            total,
            completed,
            pending: total - completed,
            progress_percent: progress_percent(completed, total),
        }
    }
}

fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Integer round-half-up, matching Math.round on the stored ratio.
    u8::try_from((completed * 200 + total) / (2 * total)).unwrap_or(100)
}
