use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::id::TaskId;

/// Calendar date layout used on the wire and in user input (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse an ISO calendar date (`YYYY-MM-DD`).
///
/// # Errors
/// Returns an error if the input is not a valid date in that layout.
pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s.trim(), DATE_FORMAT)
}

/// Format a date in the wire layout.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Error returned when a user-facing token does not name a known field value.
#[derive(Debug, Error)]
#[error("unrecognized {field}: {token}")]
pub struct ParseFieldError {
    field: &'static str,
    token: String,
}

impl ParseFieldError {
    pub(crate) fn new(field: &'static str, token: &str) -> Self {
        Self {
            field,
            token: token.to_owned(),
        }
    }
}

/// Ordinal urgency tag, `high > medium > low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Most urgent.
    High,
    /// Default urgency.
    #[default]
    Medium,
    /// Least urgent.
    Low,
}

impl Priority {
    /// Ordinal rank used by the priority sort (`high` sorts first).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseFieldError::new("priority", s)),
        }
    }
}

/// Completion status. The only transition is the bidirectional toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet completed.
    #[default]
    Pending,
    /// Marked done by the user.
    Completed,
}

impl Status {
    /// The opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    /// True for [`Status::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseFieldError::new("status", s)),
        }
    }
}

/// A single to-do item.
///
/// Field names and value encodings follow the stored `tasks` entry:
/// `{id, title, desc, priority, dueDate, status}` with `dueDate` as an ISO
/// date string or `""` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation, immutable.
    pub id: TaskId,
    /// Human-readable title; never empty for a stored task.
    pub title: String,
    /// Free-form description, may be empty.
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Urgency tag.
    pub priority: Priority,
    /// Optional calendar due date; absent dates sort last.
    #[serde(rename = "dueDate", with = "due_date_wire", default)]
    pub due_date: Option<Date>,
    /// Completion status.
    pub status: Status,
}

mod due_date_wire {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => s.serialize_str(&super::format_date(*d)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        super::parse_date(trimmed).map(Some).map_err(serde::de::Error::custom)
    }
}
