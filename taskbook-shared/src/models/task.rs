/// Task model
///
/// A task is a unit of work owned by exactly one user. The owner is set at
/// creation and never changes; only the owner may read or mutate the task.
///
/// # Status
///
/// ```text
/// TODO → DOING → DONE
/// ```
///
/// The ordering above is conceptual only. Status is a free-form field: any
/// value may be set directly via update, and no transition checks are made.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('LOW', 'MEDIUM', 'HIGH');
/// CREATE TYPE task_status AS ENUM ('TODO', 'DOING', 'DONE');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id),
///     title VARCHAR(50) NOT NULL,
///     description VARCHAR(250) NOT NULL DEFAULT '',
///     priority task_priority NOT NULL,
///     status task_status NOT NULL DEFAULT 'TODO',
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a task title
pub const TITLE_MAX_LEN: usize = 50;

/// Maximum length of a task description
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

/// Task status
///
/// New tasks start as `Todo`. Transitions are unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Doing => "DOING",
            Status::Done => "DONE",
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4, server-assigned)
    pub id: Uuid,

    /// Owning user; set at creation, immutable thereafter
    pub owner_id: Uuid,

    /// Short label (non-empty, at most 50 characters)
    pub title: String,

    /// Free text (at most 250 characters, may be empty)
    pub description: String,

    /// Priority
    pub priority: Priority,

    /// Current status (defaults to `Todo` at creation)
    pub status: Status,

    /// Optional due instant (midnight UTC of the submitted calendar date)
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Status and owner are not part of the input: new tasks always start as
/// `Todo` and belong to the principal creating them.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for an existing task
///
/// All fields are optional: a present field overwrites the stored value, an
/// absent field is left untouched. Clearing a due date is not expressible,
/// matching the reference behavior.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTask {
    /// Applies the patch onto a task in place
    ///
    /// Only present fields are copied; `updated_at` is stamped by the store
    /// when the task is saved.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
    }
}

/// Converts a calendar date from the wire into the stored due instant
///
/// Due dates are submitted as plain dates and stored at midnight UTC.
pub fn due_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
