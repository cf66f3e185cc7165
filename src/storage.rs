//! Durable storage for the task collection.
//!
//! The board keeps its whole collection as one JSON array under a single
//! well-known key. `KeyValueStore` is the medium (a directory of JSON files in
//! normal use); `TaskRepository` is the adapter on top of it that knows the key,
//! the schema, and the seed fallback.
//!
//! Reads never fail from the caller's point of view: a missing key, an I/O
//! error, malformed JSON or a collection that breaks the task invariants all
//! yield the seed collection. Writes are best effort: a failure is logged and
//! dropped.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::seed::seed_tasks;
use crate::task::Task;

/// Key the task collection is stored under.
pub const TASKS_KEY: &str = "tasks";

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value medium with whole-value replace semantics.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(buf) => Ok(Some(buf)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StorageError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        // Temp file + rename so a reader never sees half a collection.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp).map_err(io_err(&tmp))?;
        f.write_all(value.as_bytes()).map_err(io_err(&tmp))?;
        f.flush().map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        Ok(())
    }
}

/// Loads and saves the task collection through a `KeyValueStore`.
#[derive(Debug)]
pub struct TaskRepository<S> {
    backend: S,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(backend: S) -> Self {
        TaskRepository { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the saved collection, falling back to the seed tasks.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.backend.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved board, starting from seed tasks");
                return seed_tasks();
            }
            Err(e) => {
                warn!("error reading saved board, using seed tasks: {e}");
                return seed_tasks();
            }
        };

        let tasks: Vec<Task> = match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("error parsing saved board, using seed tasks: {e}");
                return seed_tasks();
            }
        };

        if let Err(reason) = check_invariants(&tasks) {
            warn!("saved board is inconsistent ({reason}), using seed tasks");
            return seed_tasks();
        }

        debug!(count = tasks.len(), "loaded saved board");
        tasks
    }

    /// Overwrite the saved collection. Failures are logged, not returned.
    pub fn save(&mut self, tasks: &[Task]) {
        if let Err(e) = self.try_save(tasks) {
            warn!("failed to save board: {e}");
        }
    }

    fn try_save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(tasks)?;
        self.backend.set(TASKS_KEY, &data)
    }
}

/// Every id unique, every title non-empty.
fn check_invariants(tasks: &[Task]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for t in tasks {
        if t.title.is_empty() {
            return Err(format!("task {} has an empty title", t.id));
        }
        if !seen.insert(t.id.as_str()) {
            return Err(format!("duplicate task id {}", t.id));
        }
    }
    Ok(())
}

/// In-process store that counts writes. Used by tests across the crate.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// A store whose every write fails.
    pub fn failing() -> Self {
        MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io {
                path: PathBuf::from(key),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, Status};

    #[test]
    fn missing_key_loads_seed() {
        let repo = TaskRepository::new(MemoryStore::default());
        assert_eq!(repo.load(), seed_tasks());
    }

    #[test]
    fn malformed_json_loads_seed() {
        let repo = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, "{not json"));
        assert_eq!(repo.load(), seed_tasks());
    }

    #[test]
    fn wrong_shape_loads_seed() {
        let repo = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, r#"[{"id":"1","title":"x"}]"#));
        assert_eq!(repo.load(), seed_tasks());

        let repo = TaskRepository::new(MemoryStore::with_value(
            TASKS_KEY,
            r#"[{"id":"1","title":"x","startDate":"a","endDate":"b","priority":"Low","status":"blocked"}]"#,
        ));
        assert_eq!(repo.load(), seed_tasks());
    }

    #[test]
    fn duplicate_ids_load_seed() {
        let one = r#"{"id":"1","title":"x","startDate":"a","endDate":"b","priority":"Low","status":"todo"}"#;
        let repo = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, &format!("[{one},{one}]")));
        assert_eq!(repo.load(), seed_tasks());
    }

    #[test]
    fn whitespace_title_is_kept_but_empty_title_loads_seed() {
        let raw = r#"[{"id":"1","title":" ","startDate":"a","endDate":"b","priority":"Low","status":"todo"}]"#;
        let tasks = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, raw)).load();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, " ");

        let raw = raw.replace(r#""title":" ""#, r#""title":"""#);
        let repo = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, &raw));
        assert_eq!(repo.load(), seed_tasks());
    }

    #[test]
    fn empty_array_is_a_valid_board() {
        let repo = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, "[]"));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn legacy_medium_priority_migrates_on_load() {
        let raw = r#"[{"id":"9","title":"Old","startDate":"a","endDate":"b","assignees":["Ann"],
            "priority":"Medium","status":"inProgress"}]"#;
        let repo = TaskRepository::new(MemoryStore::with_value(TASKS_KEY, raw));
        let tasks = repo.load();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Priority::Normal);
        assert_eq!(tasks[0].status, Status::InProgress);
    }

    #[test]
    fn save_then_load_returns_same_collection() {
        let mut repo = TaskRepository::new(MemoryStore::default());
        let mut tasks = seed_tasks();
        tasks.truncate(2);
        repo.save(&tasks);
        assert_eq!(repo.backend().writes(), 1);
        assert_eq!(repo.load(), tasks);
    }

    #[test]
    fn failed_save_is_swallowed() {
        let mut repo = TaskRepository::new(MemoryStore::failing());
        repo.save(&seed_tasks());
        assert_eq!(repo.backend().writes(), 0);
    }

    #[test]
    fn file_store_round_trips_and_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("board"));
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);

        store.set(TASKS_KEY, "[1]").unwrap();
        store.set(TASKS_KEY, "[]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.path_for(TASKS_KEY).exists());
        assert!(!store.path_for(TASKS_KEY).with_extension("json.tmp").exists());
    }

    #[test]
    fn file_backed_repository_falls_back_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for(TASKS_KEY), "{not json").unwrap();
        assert_eq!(TaskRepository::new(store).load(), seed_tasks());
    }
}
