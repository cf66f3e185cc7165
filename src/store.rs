//! The task store: the single owner of the in-memory task collection.
//!
//! Every mutation goes through a `TaskStore` method, commits to memory, writes
//! the whole collection through to the repository, and only then notifies
//! subscribers. A read that follows a mutation therefore always observes it.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::storage::{FileStore, KeyValueStore, TaskRepository};
use crate::task::{Task, TaskDraft, TaskPatch};

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(String),
}

/// What changed, delivered to subscribers after the change is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(String),
    Updated(String),
    Deleted(String),
    Replaced,
}

/// Handle returned by `TaskStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent, &[Task])>;

/// Owned, write-through task collection.
pub struct TaskStore<S = FileStore> {
    tasks: Vec<Task>,
    repo: TaskRepository<S>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Open a store over `repo`, loading whatever it holds (or the seed tasks).
    pub fn open(repo: TaskRepository<S>) -> Self {
        let tasks = repo.load();
        TaskStore {
            tasks,
            repo,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current collection in board order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    /// Id the next created task will receive: one past the largest numeric id.
    ///
    /// If the largest id is already `u64::MAX`, the smallest unused positive
    /// number is taken instead.
    pub fn next_id(&self) -> String {
        let used: HashSet<u64> = self.tasks.iter().filter_map(Task::numeric_id).collect();
        let max = used.iter().copied().max().unwrap_or(0);
        let next = max.checked_add(1).unwrap_or_else(|| {
            warn!("task ids exhausted at {max}, reusing a gap");
            (1..=u64::MAX).find(|n| !used.contains(n)).unwrap_or_default()
        });
        next.to_string()
    }

    /// Append a task built from `draft`, with blank dates set to today.
    pub fn create(&mut self, draft: TaskDraft) -> Task {
        self.create_on(draft, Local::now().date_naive())
    }

    /// As `create`, with an explicit date for blank start and end dates.
    pub fn create_on(&mut self, draft: TaskDraft, today: NaiveDate) -> Task {
        let task = draft.into_task(self.next_id(), today);
        self.tasks.push(task.clone());
        info!(id = %task.id, title = %task.title, "created task");
        self.commit(StoreEvent::Created(task.id.clone()));
        task
    }

    /// Merge `patch` into the task with `id`.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update ignored: no such task");
            return Err(StoreError::NotFound(id.to_string()));
        };
        patch.apply_to(task);
        let updated = task.clone();
        info!(id, status = updated.status.as_str(), "updated task");
        self.commit(StoreEvent::Updated(id.to_string()));
        Ok(updated)
    }

    /// Remove the task with `id`.
    pub fn delete(&mut self, id: &str) -> Result<Task, StoreError> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "delete ignored: no such task");
            return Err(StoreError::NotFound(id.to_string()));
        };
        let removed = self.tasks.remove(idx);
        info!(id, "deleted task");
        self.commit(StoreEvent::Deleted(id.to_string()));
        Ok(removed)
    }

    /// Swap in a whole new collection.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        info!(count = self.tasks.len(), "replaced task collection");
        self.commit(StoreEvent::Replaced);
    }

    /// Register `listener` to run after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent, &[Task]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, event: StoreEvent) {
        self.repo.save(&self.tasks);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, &self.tasks);
        }
    }
}
