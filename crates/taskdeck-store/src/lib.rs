//! File-backed key-value persistence for taskdeck.
//!
//! Mirrors the two browser-local storage entries of the original layout:
//! key `tasks` holds the serialized collection, key `darkMode` holds the
//! literal text `true` or `false`. Each key is one file under the store
//! directory; writes go through a temp file and a rename so a crashed write
//! never leaves a half-written entry behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use taskdeck_core::Task;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

mod error;

pub use error::StoreError;

const TASKS_KEY: &str = "tasks";
const DARK_MODE_KEY: &str = "darkMode";

/// Durable key-value store scoped to a local state directory.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory the entries live in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the previously saved collection.
    ///
    /// An absent entry yields an empty collection. An unreadable or
    /// unparseable entry is logged and also yields an empty collection;
    /// corrupt stored data must never take the caller down.
    #[must_use]
    pub fn load_tasks(&self) -> Vec<Task> {
        let Some(raw) = self.read_key(TASKS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(key = TASKS_KEY, %err, "discarding unparseable task data");
                Vec::new()
            }
        }
    }

    /// Serialize and overwrite the whole collection in a single store write.
    ///
    /// # Errors
    /// Returns an error if serialization or the file write fails.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let body = serde_json::to_string(tasks)?;
        self.write_key(TASKS_KEY, &body)
    }

    /// Load the display-mode flag; anything but the literal `true` is light mode.
    #[must_use]
    pub fn load_dark_mode(&self) -> bool {
        self.read_key(DARK_MODE_KEY)
            .is_some_and(|raw| raw.trim() == "true")
    }

    /// Persist the display-mode flag.
    ///
    /// # Errors
    /// Returns an error if the file write fails.
    pub fn save_dark_mode(&self, dark: bool) -> Result<(), StoreError> {
        self.write_key(DARK_MODE_KEY, if dark { "true" } else { "false" })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn read_key(&self, key: &'static str) -> Option<String> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, %err, "failed to read store entry; using defaults");
                None
            }
        }
    }

    fn write_key(&self, key: &'static str, contents: &str) -> Result<(), StoreError> {
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|source| StoreError::WriteEntry { key, source })?;
        tmp.write_all(contents.as_bytes())
            .map_err(|source| StoreError::WriteEntry { key, source })?;
        tmp.persist(self.key_path(key))
            .map_err(|err| StoreError::WriteEntry {
                key,
                source: err.error,
            })?;
        debug!(key, bytes = contents.len(), "wrote store entry");
        Ok(())
    }
}
