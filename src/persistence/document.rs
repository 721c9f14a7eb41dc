use super::files::{atomic_write, backup_file, ensure_dir, read_file, remove_file};
use super::migration::load_and_migrate;
use crate::domain::Task;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Storage key of the task list
pub const TASKS_KEY: &str = "tasks-collection";

/// Errors decoding a stored document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The stored blob is not a valid task list
    #[error("stored document `{key}` is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-document access to the persisted task list.
///
/// Each mounted view loads once and writes the full sequence back after
/// every mutation. There is no versioning, so two writers race and the
/// last write wins.
pub trait TaskDocument {
    fn load(&self) -> Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// Flat key-value storage: key `k` lives in `<dir>/k.json`
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(self.path_for(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.path_for(key), value)
            .with_context(|| format!("Failed to store key `{}`", key))
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        remove_file(self.path_for(key))
    }

    /// Keep a timestamped copy of a key's current value
    pub fn backup(&self, key: &str) -> Result<PathBuf> {
        backup_file(self.path_for(key))
    }
}

/// Decode a stored task list
pub fn decode_tasks(key: &str, raw: &str) -> Result<Vec<Task>, DocumentError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| DocumentError::Malformed {
        key: key.to_string(),
        source,
    })
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")
}

/// The task list stored under `tasks-collection`
#[derive(Debug, Clone)]
pub struct KeyValueDocument {
    store: KeyValueStore,
}

impl KeyValueDocument {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }
}

impl TaskDocument for KeyValueDocument {
    fn load(&self) -> Result<Vec<Task>> {
        load_and_migrate(&self.store)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = encode_tasks(tasks)?;
        self.store.set(TASKS_KEY, &json)?;
        tracing::debug!(count = tasks.len(), "saved task list");
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryDocument;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_value_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::open(temp_dir.path()).unwrap();

        assert!(store.get("missing").unwrap().is_none());
        store.set("greeting", "\"hi\"").unwrap();
        assert_eq!(store.get("greeting").unwrap().as_deref(), Some("\"hi\""));
        assert!(temp_dir.path().join("greeting.json").exists());

        store.remove("greeting").unwrap();
        assert!(store.get("greeting").unwrap().is_none());
    }

    #[test]
    fn test_absent_key_loads_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let doc = KeyValueDocument::new(KeyValueStore::open(temp_dir.path()).unwrap());

        assert!(doc.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let doc = KeyValueDocument::new(KeyValueStore::open(temp_dir.path()).unwrap());

        let tasks = vec![
            Task::new("First", Some(Priority::Low)).unwrap(),
            Task::new("Second", None).unwrap(),
            Task::new("Third", Some(Priority::High)).unwrap(),
        ];
        doc.save(&tasks).unwrap();

        assert_eq!(doc.load().unwrap(), tasks);
        assert!(temp_dir.path().join("tasks-collection.json").exists());
    }

    #[test]
    fn test_decode_reports_malformed() {
        let err = decode_tasks(TASKS_KEY, "{not json").unwrap_err();
        assert!(matches!(err, DocumentError::Malformed { .. }));
        assert!(err.to_string().contains("tasks-collection"));
    }

    #[test]
    fn test_decode_blank_is_empty() {
        assert!(decode_tasks(TASKS_KEY, "  \n").unwrap().is_empty());
    }
}
