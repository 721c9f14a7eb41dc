use super::command::CommandToken;
use super::enums::Priority;
use super::task::{Task, TaskPatch};
use crate::persistence::TaskDocument;
use anyhow::Result;

/// The ordered task list owned by one mounted view.
///
/// Every operation is total over its inputs: blank text and unknown ids are
/// quiet no-ops. The only errors surfaced are storage write failures. Each
/// successful mutation writes the whole sequence back to the document.
pub struct TaskListStore {
    tasks: Vec<Task>,
    armed: Option<Priority>,
    document: Box<dyn TaskDocument>,
}

impl TaskListStore {
    /// Mount a store: read the document once into memory
    pub fn mount(document: Box<dyn TaskDocument>) -> Result<Self> {
        let tasks = document.load()?;
        Ok(Self {
            tasks,
            armed: None,
            document,
        })
    }

    /// Re-read the document, dropping the in-memory copy
    pub fn reload(&mut self) -> Result<()> {
        self.tasks = self.document.load()?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn persist(&self) -> Result<()> {
        self.document.save(&self.tasks)
    }

    /// Priority the next created task will get
    pub fn armed_priority(&self) -> Option<Priority> {
        self.armed
    }

    pub fn arm_priority(&mut self, priority: Priority) {
        self.armed = Some(priority);
    }

    pub fn clear_armed_priority(&mut self) {
        self.armed = None;
    }

    /// Apply a parsed slash command to the armed priority
    pub fn apply_command(&mut self, command: CommandToken) {
        match command.priority() {
            Some(priority) => self.arm_priority(priority),
            None => self.clear_armed_priority(),
        }
    }

    /// Append a task with the armed priority. Returns the new id, or `None`
    /// when the text is blank.
    pub fn create(&mut self, text: &str) -> Result<Option<String>> {
        let Some(task) = Task::new(text, self.armed) else {
            return Ok(None);
        };
        let id = task.id.clone();
        tracing::debug!(id = %id, priority = ?task.priority, "task created");

        self.tasks.push(task);
        self.armed = None;
        self.persist()?;
        Ok(Some(id))
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<()> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.toggle();
        tracing::debug!(id, completed = task.completed, "task toggled");
        self.persist()
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.position(id) else {
            return Ok(());
        };
        self.tasks.remove(index);
        tracing::debug!(id, "task deleted");
        self.persist()
    }

    /// Merge text and/or priority into a task. Blank text keeps the old text.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<()> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        if !task.apply(patch) {
            return Ok(());
        }
        tracing::debug!(id, "task updated");
        self.persist()
    }

    /// Move `id` to the current index of `target_id` (remove, then reinsert)
    pub fn reorder(&mut self, id: &str, target_id: &str) -> Result<()> {
        if id == target_id {
            return Ok(());
        }
        let (Some(from), Some(to)) = (self.position(id), self.position(target_id)) else {
            return Ok(());
        };

        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        tracing::debug!(id, from, to, "task moved");
        self.persist()
    }
}
