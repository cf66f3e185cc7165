//! Create-form validation.
//!
//! Raw form text is checked here before anything reaches the store, so an
//! invalid submission never produces a partial task. Errors name the field
//! they belong to so the form can show them inline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::fields::{Priority, Status};
use crate::task::{TaskDraft, TaskPatch, DATE_FORMAT, MAX_TITLE_LEN};

/// Form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task name is required")]
    TitleRequired,

    #[error("Task name must be less than 100 characters")]
    TitleTooLong,

    #[error("Start date is required")]
    StartDateRequired,

    #[error("End date is required")]
    EndDateRequired,
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::TitleRequired | ValidationError::TitleTooLong => FormField::Title,
            ValidationError::StartDateRequired => FormField::StartDate,
            ValidationError::EndDateRequired => FormField::EndDate,
        }
    }
}

/// Check a title on its own (used by edits as well as creates).
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

/// Split comma-separated assignee text, dropping blank entries.
pub fn parse_assignees(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// What the create form submits, as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub status: Status,
    pub start_date: String,
    pub end_date: String,
    pub assignees: String,
    pub priority: Priority,
    pub description: String,
}

impl TaskInput {
    /// Fill blank dates with `today`, as the form does at submit time.
    pub fn with_default_dates(mut self, today: NaiveDate) -> Self {
        let today = today.format(DATE_FORMAT).to_string();
        if self.start_date.trim().is_empty() {
            self.start_date = today.clone();
        }
        if self.end_date.trim().is_empty() {
            self.end_date = today;
        }
        self
    }

    /// Validate every field, returning all errors at once.
    pub fn validate(&self) -> Result<TaskDraft, Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Err(e) = validate_title(&self.title) {
            errors.push(e);
        }
        if self.start_date.trim().is_empty() {
            errors.push(ValidationError::StartDateRequired);
        }
        if self.end_date.trim().is_empty() {
            errors.push(ValidationError::EndDateRequired);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let description = self.description.trim();
        Ok(TaskDraft {
            title: self.title.clone(),
            status: Some(self.status),
            start_date: Some(self.start_date.trim().to_string()),
            end_date: Some(self.end_date.trim().to_string()),
            assignees: parse_assignees(&self.assignees),
            priority: Some(self.priority),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

/// Reject a patch whose new title would be invalid.
pub fn validate_patch(patch: &TaskPatch) -> Result<(), ValidationError> {
    match &patch.title {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            ..TaskInput::default()
        }
    }

    #[test]
    fn title_bounds() {
        assert_eq!(validate_title(""), Err(ValidationError::TitleRequired));
        // Whitespace is still a title.
        assert_eq!(validate_title("   "), Ok(()));
        assert_eq!(validate_title(&"a".repeat(100)), Ok(()));
        assert_eq!(validate_title(&"a".repeat(101)), Err(ValidationError::TitleTooLong));
        // Counted in characters, not bytes.
        assert_eq!(validate_title(&"é".repeat(100)), Ok(()));
    }

    #[test]
    fn blank_dates_are_errors_until_defaulted() {
        let errors = input("X").validate().unwrap_err();
        assert_eq!(errors, vec![ValidationError::StartDateRequired, ValidationError::EndDateRequired]);
        assert_eq!(errors[1].field(), FormField::EndDate);

        let today = NaiveDate::from_ymd_opt(2024, 6, 23).unwrap();
        let draft = input("X").with_default_dates(today).validate().unwrap();
        assert_eq!(draft.start_date.as_deref(), Some("2024-06-23"));
        assert_eq!(draft.end_date.as_deref(), Some("2024-06-23"));
    }

    #[test]
    fn reports_every_failing_field() {
        let errors = input("").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field(), FormField::Title);
    }

    #[test]
    fn valid_input_becomes_draft() {
        let form = TaskInput {
            title: "Design System".into(),
            status: Status::InProgress,
            start_date: "2024-06-23".into(),
            end_date: " 2024-06-24 ".into(),
            assignees: "John, Sarah,, ".into(),
            priority: Priority::Important,
            description: "  ".into(),
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.status, Some(Status::InProgress));
        assert_eq!(draft.end_date.as_deref(), Some("2024-06-24"));
        assert_eq!(draft.assignees, ["John", "Sarah"]);
        assert_eq!(draft.priority, Some(Priority::Important));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn assignee_duplicates_are_kept() {
        assert_eq!(parse_assignees("Mike,Mike"), ["Mike", "Mike"]);
        assert!(parse_assignees("").is_empty());
    }

    #[test]
    fn patch_title_is_checked() {
        assert!(validate_patch(&TaskPatch::default()).is_ok());
        let patch = TaskPatch { title: Some(String::new()), ..TaskPatch::default() };
        assert_eq!(validate_patch(&patch), Err(ValidationError::TitleRequired));
    }
}
