//! The task board: owned collection state plus write-through persistence.

use anyhow::Result;
use taskdeck_core::{
    Priority, SortKey, Status, Task, TaskFilter, TaskId, TaskIdGenerator, TaskStats, sort_tasks,
};
use taskdeck_store::LocalStore;
use time::Date;
use tracing::debug;

/// Persistence abstraction so board logic can be unit-tested.
///
/// Loads are infallible by contract: absent or corrupt stored data degrades
/// to defaults at the adapter boundary.
pub trait StateStore {
    /// Load the previously saved collection, or empty if none exists.
    fn load_tasks(&self) -> Vec<Task>;
    /// Overwrite the persisted collection in a single store write.
    ///
    /// # Errors
    /// Returns an error if the write fails; the board surfaces it to the
    /// front end instead of crashing.
    fn save_tasks(&self, tasks: &[Task]) -> Result<()>;
    /// Load the display-mode flag, defaulting to light.
    fn load_dark_mode(&self) -> bool;
    /// Persist the display-mode flag.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn save_dark_mode(&self, dark: bool) -> Result<()>;
}

impl StateStore for LocalStore {
    fn load_tasks(&self) -> Vec<Task> {
        Self::load_tasks(self)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        Ok(Self::save_tasks(self, tasks)?)
    }

    fn load_dark_mode(&self) -> bool {
        Self::load_dark_mode(self)
    }

    fn save_dark_mode(&self, dark: bool) -> Result<()> {
        Ok(Self::save_dark_mode(self, dark)?)
    }
}

/// Re-render signal returned by mutators.
///
/// Front ends redraw on [`Change::Dirty`]; a `Dirty` mutation has already
/// been persisted when the mutator returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The collection changed; a re-render is due.
    Dirty,
    /// Nothing matched; no write happened.
    NoOp,
}

impl Change {
    /// True when a re-render is due.
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        matches!(self, Self::Dirty)
    }
}

/// User-supplied fields for a new task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    /// Title; blank input rejects the whole draft.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Urgency tag.
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<Date>,
}

/// Owned task collection with write-through persistence.
///
/// Lifecycle is `open → mutate* → drop`; every mutator persists
/// synchronously before returning its change signal.
pub struct TaskBoard<S> {
    store: S,
    tasks: Vec<Task>,
    ids: TaskIdGenerator,
    sort: SortKey,
    dark_mode: bool,
}

impl<S: StateStore> TaskBoard<S> {
    /// Load the collection and display mode once and apply the initial sort.
    ///
    /// The initial sort orders the in-memory collection only; nothing is
    /// written back until the first mutation.
    pub fn open(store: S, default_sort: SortKey) -> Self {
        let mut tasks = store.load_tasks();
        let dark_mode = store.load_dark_mode();
        let ids = TaskIdGenerator::seeded(tasks.iter().map(|task| task.id));
        sort_tasks(&mut tasks, default_sort);
        debug!(count = tasks.len(), sort = %default_sort, dark_mode, "opened task board");
        Self {
            store,
            tasks,
            ids,
            sort: default_sort,
            dark_mode,
        }
    }

    /// Create a task from `draft`.
    ///
    /// A blank (whitespace-only) title is a silent no-op returning
    /// `Ok(None)`: nothing is created and nothing is written. Otherwise the
    /// task gets a fresh unique id, `Pending` status, and is appended and
    /// persisted.
    ///
    /// # Errors
    /// Returns an error if the persistence write fails.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Option<&Task>> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let task = Task {
            id: self.ids.next_id(),
            title: title.to_owned(),
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
            status: Status::Pending,
        };
        self.tasks.push(task);
        self.persist()?;
        Ok(self.tasks.last())
    }

    /// Remove the task with `id`; unknown ids are a no-op without a write.
    ///
    /// # Errors
    /// Returns an error if the persistence write fails.
    pub fn delete(&mut self, id: TaskId) -> Result<Change> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(Change::NoOp);
        }
        self.persist()?;
        Ok(Change::Dirty)
    }

    /// Flip the status of the task with `id`; unknown ids are a no-op.
    ///
    /// # Errors
    /// Returns an error if the persistence write fails.
    pub fn toggle_status(&mut self, id: TaskId) -> Result<Change> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(Change::NoOp);
        };
        task.status = task.status.toggled();
        self.persist()?;
        Ok(Change::Dirty)
    }

    /// Flip the active sort key and re-sort the canonical collection.
    ///
    /// The new order becomes canonical in memory and reaches the store with
    /// the next mutation, matching the original load/save cadence.
    pub fn toggle_sort(&mut self) -> SortKey {
        self.set_sort(self.sort.toggled());
        self.sort
    }

    /// Apply a specific sort key to the canonical collection.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        sort_tasks(&mut self.tasks, key);
    }

    /// Flip and persist the display-mode flag.
    ///
    /// # Errors
    /// Returns an error if the persistence write fails.
    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        self.dark_mode = !self.dark_mode;
        self.store.save_dark_mode(self.dark_mode)?;
        Ok(self.dark_mode)
    }

    /// Current display-mode flag.
    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Active sort key.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Read-only snapshot of the collection in canonical order.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Direct lookup by id in the owned collection.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Filtered view over the current canonical order; never mutates.
    #[must_use]
    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(&self.tasks)
    }

    /// Statistics projection over the current collection.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::of(&self.tasks)
    }

    fn persist(&self) -> Result<()> {
        self.store.save_tasks(&self.tasks)
    }
}
