//! # Domain models for users and tasks
//!
//! Defines the records exchanged with the backend and held by the client-side
//! stores. These types are `Serialize + Deserialize` so they map one-to-one onto
//! the JSON rows of the remote `Users` and `Tasks` tables.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A row of the `Users` table plus the client-only `is_authenticated` flag. `User::default()` is the signed-out sentinel. |
//! | [`Task`] | A row of the `Tasks` table, owned by the user whose id is in `id_user`. |
//! | [`Priority`] | The five-level priority scale, with the label, icon and colour the task picker shows. |
//! | [`NewUser`] / [`NewTask`] | Request bodies for the two `POST` calls. |
//!
//! ## Helper functions
//!
//! - [`filter_by_priority`]: the client-side priority filter over a task list.
//! - [`format_timestamp`]: renders a `created_at` value as `hh:mm AM - d/m/yyyy` in UTC-5.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A user record as returned by `GET /Users`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Client-side only: set once the password check passed.
    #[serde(default, skip_serializing)]
    pub is_authenticated: bool,
}

impl User {
    /// Copy of this record flagged as authenticated.
    pub fn authenticated(self) -> Self {
        Self {
            is_authenticated: true,
            ..self
        }
    }

    /// Name shown in the profile header: the email's local part.
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

/// Body of `POST /Users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// A task record as returned by `GET /Tasks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub priority: Priority,
    pub id_user: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /Tasks`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub description: String,
    pub priority: Priority,
    pub id_user: i64,
}

/// Task priority, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl Priority {
    /// Every level in picker order.
    pub const ALL: [Priority; 5] = [
        Priority::Highest,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Lowest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Highest => "Highest",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Lowest => "Lowest",
        }
    }

    /// Material icon name used by the picker.
    pub fn icon(self) -> &'static str {
        match self {
            Priority::Highest => "keyboard-double-arrow-up",
            Priority::High => "keyboard-arrow-up",
            Priority::Medium => "remove",
            Priority::Low => "keyboard-arrow-down",
            Priority::Lowest => "keyboard-double-arrow-down",
        }
    }

    /// Hex colour used by the picker.
    pub fn color(self) -> &'static str {
        match self {
            Priority::Highest => "#ff0000",
            Priority::High => "#ff4500",
            Priority::Medium => "#ffa500",
            Priority::Low => "#32cd32",
            Priority::Lowest => "#008000",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a string names no priority level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority: {:?}", self.0)
    }
}

impl std::error::Error for UnknownPriority {}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

/// Tasks whose priority equals `priority`, in their original order.
/// `None` means no filter and returns the list unchanged.
pub fn filter_by_priority(tasks: &[Task], priority: Option<Priority>) -> Vec<Task> {
    match priority {
        Some(p) => tasks.iter().filter(|t| t.priority == p).cloned().collect(),
        None => tasks.to_vec(),
    }
}

/// Format a timestamp for display, shifted to UTC-5.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    let Some(offset) = FixedOffset::west_opt(5 * 3600) else {
        return at.to_rfc3339();
    };
    let local = at.with_timezone(&offset);

    let (pm, hour) = local.hour12();
    let ampm = if pm { "PM" } else { "AM" };

    format!(
        "{:02}:{:02} {} - {}/{}/{}",
        hour,
        local.minute(),
        ampm,
        local.day(),
        local.month(),
        local.year()
    )
}
