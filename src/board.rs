//! Derived views over a task collection.
//!
//! Everything here is a pure function of the slice it is given: grouping into
//! status columns, search/status filtering for the list view, and per-status
//! counts. Nothing is cached and nothing is written back, so views are simply
//! recomputed from the store on every render.

use crate::fields::{Status, StatusFilter};
use crate::task::Task;

/// Tasks partitioned by status, each partition in collection order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grouped<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub complete: Vec<&'a Task>,
}

impl<'a> Grouped<'a> {
    pub fn get(&self, status: Status) -> &[&'a Task] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Complete => &self.complete,
        }
    }

    fn get_mut(&mut self, status: Status) -> &mut Vec<&'a Task> {
        match status {
            Status::Todo => &mut self.todo,
            Status::InProgress => &mut self.in_progress,
            Status::Complete => &mut self.complete,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.complete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `tasks` by status, preserving relative order.
pub fn group_by_status(tasks: &[Task]) -> Grouped<'_> {
    let mut grouped = Grouped::default();
    for task in tasks {
        grouped.get_mut(task.status).push(task);
    }
    grouped
}

/// One kanban column. Derived on demand; holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    pub id: Status,
    pub title: &'static str,
    pub color: &'static str,
    pub tasks: Vec<&'a Task>,
}

/// The three board columns in display order.
pub fn columns(tasks: &[Task]) -> [Column<'_>; 3] {
    let Grouped { todo, in_progress, complete } = group_by_status(tasks);
    let column = |id: Status, tasks| Column {
        id,
        title: id.title(),
        color: id.color(),
        tasks,
    };
    [
        column(Status::Todo, todo),
        column(Status::InProgress, in_progress),
        column(Status::Complete, complete),
    ]
}

/// Search text plus status selection for the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title. Empty matches everything.
    pub search: String,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        TaskFilter {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status) && title_matches(&task.title, &self.search)
    }
}

fn title_matches(title: &str, search: &str) -> bool {
    search.is_empty() || title.to_lowercase().contains(&search.to_lowercase())
}

/// Tasks passing both the search and the status predicate, in collection order.
pub fn filter<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Number of tasks per status, plus the total.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub complete: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Complete => self.complete,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.complete
    }

    /// Count shown next to a filter button.
    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        filter.status().map_or(self.total(), |s| self.get(s))
    }
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        match task.status {
            Status::Todo => counts.todo += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Complete => counts.complete += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::fields::Priority;
    use crate::seed::seed_tasks;

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn groups_seed_in_order() {
        let seed = seed_tasks();
        let grouped = group_by_status(&seed);
        assert_eq!(titles(&grouped.todo), ["MKV Intranet V2", "Design System", "Medical Appointment"]);
        assert_eq!(titles(&grouped.in_progress), ["Testing Data", "Patient Request"]);
        assert_eq!(titles(&grouped.complete), ["Patient Meetup"]);
    }

    #[test]
    fn columns_carry_titles_and_colors() {
        let seed = seed_tasks();
        let [todo, doing, done] = columns(&seed);
        assert_eq!((todo.id, todo.title, todo.color), (Status::Todo, "To Do", "#CFB7E8"));
        assert_eq!((doing.id, doing.title), (Status::InProgress, "In Progress"));
        assert_eq!(done.tasks.len(), 1);
    }

    #[test]
    fn empty_collection_gives_empty_columns() {
        let grouped = group_by_status(&[]);
        assert!(grouped.is_empty());
        assert!(columns(&[]).iter().all(|c| c.tasks.is_empty()));
    }

    #[test]
    fn search_is_case_insensitive_title_substring() {
        let seed = seed_tasks();
        let hits = filter(&seed, &TaskFilter::new("design", StatusFilter::All));
        assert_eq!(titles(&hits), ["Design System"]);

        let hits = filter(&seed, &TaskFilter::new("PATIENT", StatusFilter::All));
        assert_eq!(titles(&hits), ["Patient Request", "Patient Meetup"]);

        // Assignees are not searched.
        assert!(filter(&seed, &TaskFilter::new("sarah", StatusFilter::All)).is_empty());
    }

    #[test]
    fn search_and_status_are_conjunctive() {
        let seed = seed_tasks();
        let hits = filter(&seed, &TaskFilter::new("patient", StatusFilter::Complete));
        assert_eq!(titles(&hits), ["Patient Meetup"]);
        assert!(filter(&seed, &TaskFilter::new("design", StatusFilter::Complete)).is_empty());
    }

    #[test]
    fn empty_search_with_all_returns_everything() {
        let seed = seed_tasks();
        assert_eq!(filter(&seed, &TaskFilter::default()).len(), seed.len());
    }

    #[test]
    fn counts_per_status() {
        let counts = status_counts(&seed_tasks());
        assert_eq!((counts.todo, counts.in_progress, counts.complete), (3, 2, 1));
        assert_eq!(counts.for_filter(StatusFilter::All), 6);
        assert_eq!(counts.for_filter(StatusFilter::InProgress), 2);
    }

    fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![Just(Status::Todo), Just(Status::InProgress), Just(Status::Complete)]
    }

    fn arb_status_filter() -> impl Strategy<Value = StatusFilter> {
        prop::sample::select(StatusFilter::ALL.to_vec())
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(("[A-Za-z ]{1,12}", arb_status()), 0..30).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, status))| Task {
                    id: (i + 1).to_string(),
                    title,
                    start_date: "2024-06-01".into(),
                    end_date: "2024-06-02".into(),
                    assignees: Vec::new(),
                    priority: Priority::Low,
                    status,
                    description: None,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn grouping_is_a_partition(tasks in arb_tasks()) {
            let grouped = group_by_status(&tasks);
            prop_assert_eq!(grouped.len(), tasks.len());

            let mut seen: HashMap<&str, usize> = HashMap::new();
            for status in Status::ALL {
                for t in grouped.get(status) {
                    prop_assert_eq!(t.status, status);
                    *seen.entry(t.id.as_str()).or_default() += 1;
                }
            }
            prop_assert_eq!(seen.len(), tasks.len());
            prop_assert!(seen.values().all(|&n| n == 1));
        }

        #[test]
        fn filter_is_status_and_title_match(
            tasks in arb_tasks(),
            search in "[A-Za-z]{0,3}",
            status in arb_status_filter(),
        ) {
            let expected: Vec<&Task> = tasks
                .iter()
                .filter(|t| status.matches(t.status))
                .filter(|t| t.title.to_lowercase().contains(&search.to_lowercase()))
                .collect();
            prop_assert_eq!(filter(&tasks, &TaskFilter::new(search.clone(), status)), expected);
        }
    }
}
