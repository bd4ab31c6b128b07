use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fmt, str::FromStr};

/// Identifier of a task (Unix milliseconds at creation, bumped on collision).
///
/// Serialized as a bare JSON number to stay compatible with the stored
/// `tasks` layout.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for TaskId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Generator producing strictly increasing task identifiers.
///
/// Seed it from the loaded collection so fresh ids never collide with stored
/// ones, even when the wall clock rewinds between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskIdGenerator {
    last: u64,
}

impl TaskIdGenerator {
    /// Generator with no issued ids.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Generator that will only issue ids above every id in `existing`.
    pub fn seeded(existing: impl IntoIterator<Item = TaskId>) -> Self {
        Self {
            last: existing.into_iter().map(|id| id.0).max().unwrap_or(0),
        }
    }

    /// Issue the next unique identifier.
    ///
    /// Wall-clock milliseconds, advanced past the previous id when two
    /// creations land in the same millisecond.
    pub fn next_id(&mut self) -> TaskId {
        self.last = unix_millis().max(self.last + 1);
        TaskId(self.last)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| u64::try_from(elapsed.as_millis()).ok())
        .unwrap_or(0)
}
