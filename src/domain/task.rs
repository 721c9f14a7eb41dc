use super::enums::Priority;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique ID, generated once and never reused
    pub id: String,
    /// Display text (always trimmed, never empty)
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Task {
    /// Build a task from raw input. Returns `None` when the text trims to nothing.
    pub fn new(text: &str, priority: Option<Priority>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            priority,
        })
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Apply a partial edit. Blank text keeps the previous text.
    /// Returns whether anything changed.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        let mut changed = false;

        if let Some(text) = &patch.text {
            let text = text.trim();
            if !text.is_empty() && text != self.text {
                self.text = text.to_string();
                changed = true;
            }
        }

        if let Some(priority) = patch.priority {
            if priority != self.priority {
                self.priority = priority;
                changed = true;
            }
        }

        changed
    }
}

/// Partial update for a task. `priority: Some(None)` clears the priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Option<Priority>>,
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            priority: None,
        }
    }

    pub fn priority(priority: Option<Priority>) -> Self {
        Self {
            text: None,
            priority: Some(priority),
        }
    }
}
