//! The fixed collection a board starts from when nothing valid is saved.

use crate::fields::{Priority, Status};
use crate::task::Task;

fn seed(
    id: &str,
    title: &str,
    start_date: &str,
    end_date: &str,
    assignees: &[&str],
    priority: Priority,
    status: Status,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        assignees: assignees.iter().map(|a| a.to_string()).collect(),
        priority,
        status,
        description: None,
    }
}

/// Seed tasks: three to do, two in progress, one complete.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        seed("1", "MKV Intranet V2", "04/06/2024", "16/06/2014", &["John", "Sarah", "Mike"], Priority::Normal, Status::Todo),
        seed("2", "Design System", "23/06/2024", "24/06/2024", &["John", "Sarah"], Priority::Important, Status::Todo),
        seed("3", "Medical Appointment", "16/06/2024", "18/06/2024", &["John", "Sarah"], Priority::Urgent, Status::Todo),
        seed("4", "Testing Data", "23/06/2024", "24/06/2024", &["John", "Sarah"], Priority::Urgent, Status::InProgress),
        seed("5", "Patient Request", "16/06/2024", "18/06/2024", &["John", "Sarah"], Priority::Urgent, Status::InProgress),
        seed("6", "Patient Meetup", "23/06/2024", "24/06/2024", &["Mike"], Priority::Low, Status::Complete),
    ]
}
