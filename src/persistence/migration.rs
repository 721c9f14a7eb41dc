use super::document::{decode_tasks, encode_tasks, DocumentError, KeyValueStore, TASKS_KEY};
use crate::domain::{Priority, Task};
use anyhow::Result;
use serde::Deserialize;
use uuid::Uuid;

/// Older storage keys, newest first
pub const LEGACY_KEYS: &[&str] = &["notion-todos-v3", "notion-todos-v2", "notion-todos"];

/// Record shape of the legacy lists. Priority was free text there.
#[derive(Debug, Deserialize)]
struct LegacyTask {
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Option<String>,
}

impl LegacyTask {
    fn into_task(self) -> Task {
        Task {
            id: self.id,
            text: self.text,
            completed: self.completed,
            priority: self.priority.as_deref().and_then(Priority::from_name),
        }
    }
}

/// Restore the list invariants on loaded records: text is trimmed, blank
/// records are dropped, and missing or repeated ids get a fresh one.
pub fn normalize_tasks(records: impl IntoIterator<Item = Task>) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::new();
    for mut task in records {
        let text = task.text.trim();
        if text.is_empty() {
            continue;
        }
        task.text = text.to_string();

        if task.id.trim().is_empty() || tasks.iter().any(|t| t.id == task.id) {
            task.id = Uuid::new_v4().to_string();
        }
        tasks.push(task);
    }
    tasks
}

/// Load the task list on mount
///
/// 1. If `tasks-collection` exists, decode it. A malformed blob is backed up
///    and the list starts empty (fail closed).
/// 2. Otherwise import the newest legacy key and write it under the current key.
/// 3. Nothing stored at all is an empty list.
pub fn load_and_migrate(store: &KeyValueStore) -> Result<Vec<Task>> {
    if let Some(raw) = store.get(TASKS_KEY)? {
        return match decode_tasks(TASKS_KEY, &raw) {
            Ok(records) => {
                let stored = records.len();
                let tasks = normalize_tasks(records);
                if tasks.len() != stored {
                    tracing::warn!(stored, kept = tasks.len(), "dropped blank tasks on load");
                }
                tracing::info!(count = tasks.len(), "loaded task list");
                Ok(tasks)
            }
            Err(err) => fail_closed(store, TASKS_KEY, err),
        };
    }

    for key in LEGACY_KEYS {
        let Some(raw) = store.get(key)? else {
            continue;
        };

        let tasks = match decode_legacy(key, &raw) {
            Ok(tasks) => tasks,
            Err(err) => return fail_closed(store, key, err),
        };

        store.set(TASKS_KEY, &encode_tasks(&tasks)?)?;
        tracing::info!(from = *key, count = tasks.len(), "migrated legacy task list");
        return Ok(tasks);
    }

    Ok(Vec::new())
}

fn decode_legacy(key: &str, raw: &str) -> Result<Vec<Task>, DocumentError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<LegacyTask> =
        serde_json::from_str(raw).map_err(|source| DocumentError::Malformed {
            key: key.to_string(),
            source,
        })?;

    Ok(normalize_tasks(records.into_iter().map(LegacyTask::into_task)))
}

/// Move an unreadable blob aside and start empty. The key is only cleared
/// once the backup exists, so nothing is lost.
fn fail_closed(store: &KeyValueStore, key: &str, err: DocumentError) -> Result<Vec<Task>> {
    match store.backup(key) {
        Ok(path) => {
            tracing::warn!(
                error = %err,
                backup = %path.display(),
                "unreadable task list, starting empty"
            );
            store.remove(key)?;
        }
        Err(backup_err) => tracing::warn!(
            error = %err,
            backup_error = %backup_err,
            "unreadable task list and backup failed, starting empty"
        ),
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn open_store() -> (tempfile::TempDir, KeyValueStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::open(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_nothing_stored_is_empty() {
        let (_dir, store) = open_store();
        assert!(load_and_migrate(&store).unwrap().is_empty());
        assert!(store.get(TASKS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_current_key_wins_over_legacy() {
        let (_dir, store) = open_store();
        let current = vec![Task::new("Current", None).unwrap()];
        store.set(TASKS_KEY, &encode_tasks(&current).unwrap()).unwrap();
        store
            .set("notion-todos", r#"[{"id":"1","text":"Old","completed":false}]"#)
            .unwrap();

        assert_eq!(load_and_migrate(&store).unwrap(), current);
    }

    #[test]
    fn test_migrates_newest_legacy_key() {
        let (_dir, store) = open_store();
        store
            .set("notion-todos", r#"[{"id":"1","text":"Oldest","completed":false}]"#)
            .unwrap();
        store
            .set(
                "notion-todos-v3",
                r#"[
                    {"id":"a","text":" Plan week ","completed":false,"priority":"high"},
                    {"id":"b","text":"   ","completed":false},
                    {"id":"c","text":"Read","completed":true,"priority":"someday"}
                ]"#,
            )
            .unwrap();

        let tasks = load_and_migrate(&store).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "a");
        assert_eq!(tasks[0].text, "Plan week");
        assert_eq!(tasks[0].priority, Some(Priority::High));
        assert_eq!(tasks[1].id, "c");
        assert!(tasks[1].completed);
        assert_eq!(tasks[1].priority, None);

        // Written under the current key for the next mount
        let stored = decode_tasks(TASKS_KEY, &store.get(TASKS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, tasks);
    }

    #[test]
    fn test_legacy_duplicate_ids_are_reassigned() {
        let (_dir, store) = open_store();
        store
            .set(
                "notion-todos",
                r#"[{"id":"x","text":"One"},{"id":"x","text":"Two"},{"text":"Three"}]"#,
            )
            .unwrap();

        let tasks = load_and_migrate(&store).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "x");
        assert_ne!(tasks[1].id, "x");
        assert!(!tasks[2].id.is_empty());
    }

    #[test]
    fn test_current_key_is_normalized_on_load() {
        let (_dir, store) = open_store();
        store
            .set(
                TASKS_KEY,
                r#"[
                    {"id":"x","text":"One"},
                    {"id":"x","text":" Two "},
                    {"id":"y","text":"   "}
                ]"#,
            )
            .unwrap();

        let tasks = load_and_migrate(&store).unwrap();
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two"]);
        assert_eq!(tasks[0].id, "x");
        assert_ne!(tasks[1].id, "x");
    }

    #[test]
    fn test_normalize_tasks() {
        let records = vec![
            Task { id: String::new(), text: "No id".to_string(), completed: false, priority: None },
            Task { id: "a".to_string(), text: "\t".to_string(), completed: true, priority: None },
            Task { id: "a".to_string(), text: "Kept".to_string(), completed: true, priority: None },
        ];

        let tasks = normalize_tasks(records);
        assert_eq!(tasks.len(), 2);
        assert!(!tasks[0].id.is_empty());
        assert_eq!(tasks[1].id, "a");
        assert!(tasks[1].completed);
    }

    #[test]
    fn test_malformed_fails_closed_with_backup() {
        let (dir, store) = open_store();
        store.set(TASKS_KEY, "{ definitely not a list").unwrap();

        let tasks = load_and_migrate(&store).unwrap();
        assert!(tasks.is_empty());
        assert!(store.get(TASKS_KEY).unwrap().is_none());

        // A second mount finds nothing to back up again
        assert!(load_and_migrate(&store).unwrap().is_empty());

        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            fs::read_to_string(backups[0].path()).unwrap(),
            "{ definitely not a list"
        );
    }
}
