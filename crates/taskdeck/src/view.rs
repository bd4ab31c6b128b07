//! Text projection of the task collection for command output.

use taskdeck_core::{Task, TaskStats, format_date};

const EMPTY_MESSAGE: &str = "No tasks found. Add a new task or adjust filters.";

/// One-line rendering of a task.
#[must_use]
pub fn task_line(task: &Task) -> String {
    let due = task
        .due_date
        .map_or_else(|| "no due date".to_owned(), format_date);
    let mut line = format!(
        "{:>13}  [{:<6}] {:<9}  {}",
        task.id,
        task.priority.as_str(),
        task.status.as_str(),
        task.title
    );
    if !task.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&task.description);
    }
    line.push_str(&format!("  (due {due})"));
    line
}

/// The filtered view plus the statistics footer.
#[must_use]
pub fn list_block(tasks: &[&Task], stats: TaskStats) -> String {
    let mut out = String::new();
    if tasks.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
    } else {
        for task in tasks {
            out.push_str(&task_line(task));
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&stats_block(stats));
    out
}

/// The statistics projection as two lines of text.
#[must_use]
pub fn stats_block(stats: TaskStats) -> String {
    format!(
        "{} total / {} pending / {} completed\n{}% complete\n",
        stats.total, stats.pending, stats.completed, stats.progress_percent
    )
}
