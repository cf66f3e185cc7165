//! Plain-text rendering for CLI output.

use crate::board::{Column, StatusCounts};
use crate::fields::StatusFilter;
use crate::task::Task;

/// Print tasks as a fixed-width table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<5} {:<12} {:<10} {:<25} {:<20} {}",
        "ID", "Status", "Priority", "Dates", "Assignees", "Title"
    );
    for t in tasks {
        println!("{}", table_row(t));
    }
}

fn table_row(t: &Task) -> String {
    format!(
        "{:<5} {:<12} {:<10} {:<25} {:<20} {}",
        truncate(&t.id, 5),
        t.status.title(),
        t.priority.as_str(),
        truncate(&t.date_range(), 25),
        truncate(&format_assignees(&t.assignees), 20),
        t.title
    )
}

/// "All (6)  To Do (3)  In Progress (2)  Complete (1)", marking the active filter.
pub fn filter_bar(counts: &StatusCounts, active: StatusFilter) -> String {
    StatusFilter::ALL
        .iter()
        .map(|&f| {
            let label = format!("{} ({})", f.label(), counts.for_filter(f));
            if f == active {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Print one kanban column as a heading plus a card per line.
pub fn print_column(column: &Column<'_>) {
    println!("{} ({})", column.title, column.tasks.len());
    if column.tasks.is_empty() {
        println!("  No tasks yet");
    }
    for t in &column.tasks {
        println!("  #{:<4} {} [{}]", t.id, t.title, t.priority.as_str());
    }
}

/// Print every field of a task.
pub fn print_task(task: &Task) {
    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Status:       {}", task.status.title());
    println!("Priority:     {}", task.priority.as_str());
    println!("Start:        {}", task.start_date);
    println!("End:          {}", task.end_date);
    println!("Assignees:    {}", format_assignees(&task.assignees));
    println!("Description:\n{}", task.description.as_deref().unwrap_or("-"));
}

pub fn format_assignees(assignees: &[String]) -> String {
    if assignees.is_empty() {
        "-".to_string()
    } else {
        assignees.join(", ")
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::status_counts;
    use crate::seed::seed_tasks;

    #[test]
    fn truncate_respects_char_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Medical Appointment", 8), "Medical…");
        assert_eq!(truncate("ééééé", 3).chars().count(), 3);
    }

    #[test]
    fn filter_bar_marks_active_and_counts() {
        let counts = status_counts(&seed_tasks());
        assert_eq!(
            filter_bar(&counts, StatusFilter::Todo),
            "All (6)  [To Do (3)]  In Progress (2)  Complete (1)"
        );
    }

    #[test]
    fn table_row_shows_dash_for_no_assignees() {
        let mut task = seed_tasks().remove(5);
        task.assignees.clear();
        let row = table_row(&task);
        assert!(row.ends_with(&format!("{:<20} Patient Meetup", "-")));
    }
}
