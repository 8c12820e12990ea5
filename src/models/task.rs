use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{messages, AppError};

/// Accepted textual layouts for `dueDate`, tried in order after RFC 3339.
const DUE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    /// Identifier of the owning user.
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Free-form label chosen by the user.
    pub category: String,
    /// `None` means the task has no deadline.
    pub due_date: Option<NaiveDateTime>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or updating a task.
///
/// Title and category are required on both operations. `completed` is only honoured
/// by updates, where omitting it keeps the stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(
        required(message = "Título e categoria são obrigatórios"),
        length(min = 1, message = "Título e categoria são obrigatórios")
    )]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(
        required(message = "Título e categoria são obrigatórios"),
        length(min = 1, message = "Título e categoria são obrigatórios")
    )]
    pub category: Option<String>,

    #[serde(rename = "dueDate", alias = "due_date")]
    pub due_date: Option<String>,

    pub completed: Option<bool>,
}

/// Validated task fields, ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub due_date: Option<NaiveDateTime>,
    pub completed: Option<bool>,
}

impl TaskInput {
    /// Validates the input and converts it into storable fields.
    pub fn into_fields(self) -> Result<TaskFields, AppError> {
        self.validate()?;
        let due_date = match self.due_date.as_deref() {
            Some(raw) => parse_due_date(raw)?,
            None => None,
        };
        Ok(TaskFields {
            title: self.title.unwrap_or_default(),
            description: self.description,
            category: self.category.unwrap_or_default(),
            due_date,
            completed: self.completed,
        })
    }
}

/// Parses a client-supplied due date.
///
/// A bare date means midnight of that day; RFC 3339 timestamps are converted to UTC.
/// An empty string is treated as "no deadline".
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDateTime>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.naive_utc()));
    }
    for format in DUE_DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(dt));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Some)
        .ok_or_else(|| AppError::ValidationError(messages::INVALID_DUE_DATE.into()))
}
