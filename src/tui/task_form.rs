//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure behind the create-task popup:
//! field ordering, text editing, selector cycling, and validation on submit
//! with per-field error messages.

use chrono::NaiveDate;

use crate::{
    fields::{Priority, Status},
    task::TaskDraft,
    tui::input::InputField,
    validate::{FormField, TaskInput, ValidationError},
};

/// Global order constants for the create form fields.
pub const TITLE_ORDER: usize = 0;
pub const STATUS_ORDER: usize = 1;
pub const START_DATE_ORDER: usize = 2;
pub const END_DATE_ORDER: usize = 3;
pub const ASSIGNEES_ORDER: usize = 4;
pub const PRIORITY_ORDER: usize = 5;
pub const DESCRIPTION_ORDER: usize = 6;
pub const FIELD_COUNT: usize = 7;

/// Create-task form state.
pub struct TaskForm {
    pub title: InputField,
    pub start_date: InputField,
    pub end_date: InputField,
    pub assignees: InputField,
    pub description: InputField,
    pub status: usize,
    pub priority: usize,
    pub current_field: usize,
    pub errors: Vec<ValidationError>,
}

impl TaskForm {
    /// Empty form. `status` preselects the column the form was opened from.
    pub fn new(status: Status) -> Self {
        Self {
            title: InputField::new(),
            start_date: InputField::new(),
            end_date: InputField::new(),
            assignees: InputField::new(),
            description: InputField::new(),
            status: status.index(),
            priority: 0, // Low
            current_field: TITLE_ORDER,
            errors: Vec::new(),
        }
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL[self.status]
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL[self.priority]
    }

    /// Text input behind the current field, or `None` on a selector.
    fn current_input_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            START_DATE_ORDER => Some(&mut self.start_date),
            END_DATE_ORDER => Some(&mut self.end_date),
            ASSIGNEES_ORDER => Some(&mut self.assignees),
            DESCRIPTION_ORDER => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn is_selector(field: usize) -> bool {
        matches!(field, STATUS_ORDER | PRIORITY_ORDER)
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(input) = self.current_input_mut() {
            input.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.handle_backspace();
        }
    }

    /// Move the cursor in a text field, or cycle a selector.
    pub fn handle_left_right(&mut self, right: bool) {
        let cycle = |idx: usize, len: usize| if right { (idx + 1) % len } else { (idx + len - 1) % len };
        match self.current_field {
            STATUS_ORDER => self.status = cycle(self.status, Status::ALL.len()),
            PRIORITY_ORDER => self.priority = cycle(self.priority, Priority::ALL.len()),
            _ => {
                if let Some(input) = self.current_input_mut() {
                    if right {
                        input.move_cursor_right();
                    } else {
                        input.move_cursor_left();
                    }
                }
            }
        }
    }

    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            title: self.title.value.clone(),
            status: self.selected_status(),
            start_date: self.start_date.value.clone(),
            end_date: self.end_date.value.clone(),
            assignees: self.assignees.value.clone(),
            priority: self.selected_priority(),
            description: self.description.value.clone(),
        }
    }

    /// Validate the form, defaulting blank dates to `today`.
    ///
    /// On failure the errors are kept on the form for inline display and the
    /// cursor jumps to the first offending field.
    pub fn submit(&mut self, today: NaiveDate) -> Option<TaskDraft> {
        match self.to_input().with_default_dates(today).validate() {
            Ok(draft) => {
                self.errors.clear();
                Some(draft)
            }
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.current_field = field_order(first.field());
                }
                self.errors = errors;
                None
            }
        }
    }

    /// Error to show under `field`, if any.
    pub fn error_for(&self, field: FormField) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }
}

fn field_order(field: FormField) -> usize {
    match field {
        FormField::Title => TITLE_ORDER,
        FormField::StartDate => START_DATE_ORDER,
        FormField::EndDate => END_DATE_ORDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 23).unwrap()
    }

    fn type_text(form: &mut TaskForm, text: &str) {
        for c in text.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn empty_title_keeps_form_open_with_error() {
        let mut form = TaskForm::new(Status::Todo);
        form.current_field = ASSIGNEES_ORDER;
        assert!(form.submit(today()).is_none());
        assert_eq!(form.current_field, TITLE_ORDER);
        assert_eq!(form.error_for(FormField::Title), Some(&ValidationError::TitleRequired));
        assert_eq!(form.error_for(FormField::StartDate), None);
    }

    #[test]
    fn filled_form_submits_draft() {
        let mut form = TaskForm::new(Status::InProgress);
        type_text(&mut form, "Ship it");
        form.current_field = PRIORITY_ORDER;
        form.handle_left_right(false);
        form.current_field = ASSIGNEES_ORDER;
        type_text(&mut form, "Ann,Bo");

        let draft = form.submit(today()).unwrap();
        assert_eq!(draft.title, "Ship it");
        assert_eq!(draft.status, Some(Status::InProgress));
        assert_eq!(draft.priority, Some(Priority::Urgent));
        assert_eq!(draft.assignees, ["Ann", "Bo"]);
        assert_eq!(draft.start_date.as_deref(), Some("2024-06-23"));
    }

    #[test]
    fn typing_on_a_selector_is_ignored_and_fields_wrap() {
        let mut form = TaskForm::new(Status::Todo);
        form.prev_field();
        assert_eq!(form.current_field, DESCRIPTION_ORDER);
        form.next_field();
        form.next_field();
        assert!(TaskForm::is_selector(form.current_field));
        type_text(&mut form, "zz");
        form.handle_left_right(true);
        assert_eq!(form.selected_status(), Status::InProgress);
        assert!(form.title.value.is_empty());
    }
}
