//! Drop-event resolution: turning "card X was released over Y" into a status
//! change.
//!
//! A drop carries the dragged task's id and an optional target. The target is
//! either a column (the status is read straight off it) or another card (the
//! dragged task joins that card's column). Order inside a column is not
//! tracked; a moved task simply appears wherever collection order puts it in
//! its new column.
//!
//! Status transitions are unconstrained: any status can be dropped onto any
//! other.

use tracing::{debug, info};

use crate::fields::Status;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::{Task, TaskPatch};

/// Separator between a status prefix and the rest of a legacy target id,
/// as in `todo-3`.
const LEGACY_SEPARATOR: char = '-';

/// Where a card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The surface of a status column.
    Column(Status),
    /// Another card, identified by task id.
    Task(String),
}

impl DropTarget {
    /// Interpret a raw droppable identifier.
    ///
    /// An exact status id, or a status id followed by `-`, is a column. Any
    /// other string names no column, so a drop onto it leaves the status alone.
    pub fn from_legacy_id(id: &str) -> Option<DropTarget> {
        if let Some(status) = Status::from_id(id) {
            return Some(DropTarget::Column(status));
        }
        Status::ALL
            .into_iter()
            .find(|s| {
                id.strip_prefix(s.as_str())
                    .is_some_and(|rest| rest.starts_with(LEGACY_SEPARATOR))
            })
            .map(DropTarget::Column)
    }
}

/// A finished drag: the dragged task and where it landed, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    pub active: String,
    pub over: Option<DropTarget>,
}

impl DropEvent {
    pub fn new(active: impl Into<String>, over: Option<DropTarget>) -> Self {
        DropEvent {
            active: active.into(),
            over,
        }
    }

    /// A drop onto a column.
    pub fn onto_column(active: impl Into<String>, status: Status) -> Self {
        DropEvent::new(active, Some(DropTarget::Column(status)))
    }

    /// A drop onto another card.
    pub fn onto_task(active: impl Into<String>, task_id: impl Into<String>) -> Self {
        DropEvent::new(active, Some(DropTarget::Task(task_id.into())))
    }
}

/// The mutation a drop resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: String,
    pub from: Status,
    pub to: Status,
}

/// Status a target stands for, looked up against `tasks`.
pub fn target_status(tasks: &[Task], target: &DropTarget) -> Option<Status> {
    match target {
        DropTarget::Column(status) => Some(*status),
        DropTarget::Task(id) => tasks.iter().find(|t| &t.id == id).map(|t| t.status),
    }
}

/// Work out what a drop would change, without changing anything.
///
/// Returns `None` when there is no target, the dragged task is unknown, the
/// target does not map to a status, or the status would not change.
pub fn resolve(tasks: &[Task], event: &DropEvent) -> Option<StatusChange> {
    let target = event.over.as_ref()?;
    let task = tasks.iter().find(|t| t.id == event.active)?;
    let to = target_status(tasks, target)?;
    if to == task.status {
        return None;
    }
    Some(StatusChange {
        task_id: task.id.clone(),
        from: task.status,
        to,
    })
}

/// Resolve `event` and commit the result as a single status update.
pub fn apply<S: KeyValueStore>(store: &mut TaskStore<S>, event: &DropEvent) -> Option<StatusChange> {
    let Some(change) = resolve(store.tasks(), event) else {
        debug!(active = %event.active, over = ?event.over, "drop resolved to no change");
        return None;
    };
    // The task was found a moment ago and nothing runs in between.
    store.update(&change.task_id, &TaskPatch::status(change.to)).ok()?;
    info!(id = %change.task_id, from = change.from.as_str(), to = change.to.as_str(), "moved task");
    Some(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tasks;
    use crate::storage::{MemoryStore, TaskRepository, TASKS_KEY};

    fn store() -> TaskStore<MemoryStore> {
        TaskStore::open(TaskRepository::new(MemoryStore::default()))
    }

    #[test]
    fn legacy_ids_map_to_typed_targets() {
        assert_eq!(DropTarget::from_legacy_id("todo"), Some(DropTarget::Column(Status::Todo)));
        assert_eq!(DropTarget::from_legacy_id("inProgress"), Some(DropTarget::Column(Status::InProgress)));
        assert_eq!(DropTarget::from_legacy_id("complete-4"), Some(DropTarget::Column(Status::Complete)));
        // A prefix without the separator is not a column.
        assert_eq!(DropTarget::from_legacy_id("todos"), None);
        assert_eq!(DropTarget::from_legacy_id("in"), None);
    }

    #[test]
    fn unmapped_legacy_id_leaves_status_unchanged() {
        let mut store = store();
        let event = DropEvent::new("1", DropTarget::from_legacy_id("6"));
        assert_eq!(apply(&mut store, &event), None);
        assert_eq!(store.get("1").unwrap().status, Status::Todo);
        assert_eq!(store.repository().backend().writes(), 0);
    }

    #[test]
    fn no_target_is_no_change() {
        let mut store = store();
        let event = DropEvent::new("1", None);
        assert_eq!(resolve(store.tasks(), &event), None);
        assert_eq!(apply(&mut store, &event), None);
        assert_eq!(store.tasks(), seed_tasks().as_slice());
        assert_eq!(store.repository().backend().writes(), 0);
    }

    #[test]
    fn unknown_dragged_task_is_no_change() {
        let mut store = store();
        assert_eq!(apply(&mut store, &DropEvent::onto_column("42", Status::Complete)), None);
        assert_eq!(store.repository().backend().writes(), 0);
    }

    #[test]
    fn drop_on_column_changes_only_that_task_and_saves_once() {
        let mut store = store();
        let change = apply(&mut store, &DropEvent::onto_column("4", Status::Complete)).unwrap();
        assert_eq!(
            change,
            StatusChange { task_id: "4".into(), from: Status::InProgress, to: Status::Complete }
        );

        let mut expected = seed_tasks();
        expected[3].status = Status::Complete;
        assert_eq!(store.tasks(), expected.as_slice());

        let backend = store.repository().backend();
        assert_eq!(backend.writes(), 1);
        let saved: Vec<Task> = serde_json::from_str(backend.raw(TASKS_KEY).unwrap()).unwrap();
        assert_eq!(saved, expected);
    }

    #[test]
    fn todo_task_dropped_on_in_progress_column() {
        let mut store = store();
        store.update("4", &TaskPatch::status(Status::Todo)).unwrap();
        let change = apply(&mut store, &DropEvent::onto_column("4", Status::InProgress)).unwrap();
        assert_eq!((change.from, change.to), (Status::Todo, Status::InProgress));
        assert_eq!(store.get("4").unwrap().status, Status::InProgress);
        assert_eq!(store.repository().backend().writes(), 2);
    }

    #[test]
    fn drop_on_card_joins_that_cards_column() {
        let mut store = store();
        let change = apply(&mut store, &DropEvent::onto_task("1", "6")).unwrap();
        assert_eq!(change.to, Status::Complete);
        assert_eq!(store.get("1").unwrap().status, Status::Complete);
    }

    #[test]
    fn drop_on_unknown_card_or_same_column_is_no_change() {
        let mut store = store();
        assert_eq!(apply(&mut store, &DropEvent::onto_task("1", "ghost")), None);
        assert_eq!(apply(&mut store, &DropEvent::onto_column("1", Status::Todo)), None);
        assert_eq!(apply(&mut store, &DropEvent::onto_task("1", "2")), None);
        assert_eq!(store.repository().backend().writes(), 0);
    }

    #[test]
    fn any_status_reaches_any_other() {
        let mut store = store();
        for to in [Status::Todo, Status::Complete, Status::InProgress, Status::Todo] {
            let change = apply(&mut store, &DropEvent::onto_column("6", to)).unwrap();
            assert_eq!(change.to, to);
        }
    }

    #[test]
    fn dragging_onto_itself_is_no_change() {
        let store = store();
        assert_eq!(resolve(store.tasks(), &DropEvent::onto_task("3", "3")), None);
    }
}
