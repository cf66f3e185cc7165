//! Task data structure and related functionality.
//!
//! This module defines the persisted `Task` record along with the two shapes
//! used to mutate it: `TaskDraft` (everything a create form submits) and
//! `TaskPatch` (a partial set of fields merged into an existing task).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// Date layout used when a blank start or end date defaults to today.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest title a task may carry, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// A single unit of work on the board.
///
/// Field names serialize in camelCase to match the saved board layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    /// The id as a number, if it is one. Boards written by older builds may
    /// carry non-numeric ids.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    /// "start - end" label for tables.
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }
}

/// Field values for a task that does not exist yet.
///
/// Unset fields take the board defaults when the draft becomes a task:
/// status `todo`, priority `Low`, no assignees, and today's date for a blank
/// start or end date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub status: Option<Status>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assignees: Vec<String>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        TaskDraft {
            title: title.into(),
            ..TaskDraft::default()
        }
    }

    /// Build the task this draft describes, stamping it with `id`.
    pub fn into_task(self, id: String, today: NaiveDate) -> Task {
        let today = today.format(DATE_FORMAT).to_string();
        Task {
            id,
            title: self.title,
            start_date: non_blank(self.start_date).unwrap_or_else(|| today.clone()),
            end_date: non_blank(self.end_date).unwrap_or(today),
            assignees: self.assignees,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or(Status::Todo),
            description: non_blank(self.description),
        }
    }
}

/// A partial update. Only the fields that are `Some` are written.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assignees: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub description: Option<Option<String>>,
}

impl TaskPatch {
    /// A patch that only moves the task to `status`.
    pub fn status(status: Status) -> Self {
        TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Merge the present fields into `task`. The id is never touched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(start) = &self.start_date {
            task.start_date = start.clone();
        }
        if let Some(end) = &self.end_date {
            task.end_date = end.clone();
        }
        if let Some(assignees) = &self.assignees {
            task.assignees = assignees.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(description) = &self.description {
            task.description = non_blank(description.clone());
        }
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 23).unwrap()
    }

    #[test]
    fn draft_defaults_fill_blank_fields() {
        let mut draft = TaskDraft::new("X");
        draft.start_date = Some("  ".into());
        let task = draft.into_task("7".into(), day());

        assert_eq!(task.id, "7");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.start_date, "2024-06-23");
        assert_eq!(task.end_date, "2024-06-23");
        assert!(task.assignees.is_empty());
        assert_eq!(task.description, None);
    }

    #[test]
    fn serializes_camel_case_and_omits_missing_description() {
        let task = TaskDraft::new("Design System").into_task("2".into(), day());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["startDate"], "2024-06-23");
        assert_eq!(json["status"], "todo");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn legacy_record_without_description_or_assignees_parses() {
        let json = r#"{"id":"1","title":"MKV Intranet V2","startDate":"04/06/2024",
            "endDate":"16/06/2014","priority":"Medium","status":"todo"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Normal);
        assert!(task.assignees.is_empty());
        assert_eq!(task.numeric_id(), Some(1));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut task = TaskDraft::new("Old").into_task("3".into(), day());
        task.description = Some("keep me".into());

        let patch = TaskPatch {
            title: Some("New".into()),
            priority: Some(Priority::Urgent),
            ..TaskPatch::default()
        };
        patch.apply_to(&mut task);

        assert_eq!(task.title, "New");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.description.as_deref(), Some("keep me"));

        TaskPatch { description: Some(None), ..TaskPatch::default() }.apply_to(&mut task);
        assert_eq!(task.description, None);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::status(Status::Complete).is_empty());
    }
}
