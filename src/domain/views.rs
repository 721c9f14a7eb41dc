use super::enums::Priority;
use super::task::Task;

/// Number of tasks shown on the focus dashboard
pub const FOCUS_SLOTS: usize = 3;

/// Split into (active, completed), each in stored order
pub fn partition(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|t| !t.completed)
}

/// Ids of the partition a task belongs to, in stored order
pub fn partition_ids(tasks: &[Task], completed: bool) -> Vec<&str> {
    tasks
        .iter()
        .filter(|t| t.completed == completed)
        .map(|t| t.id.as_str())
        .collect()
}

/// Top open tasks for the dashboard: high priority first, otherwise stored order
pub fn top_focus(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut active: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    // sort_by_key is stable, so ties keep their relative order
    active.sort_by_key(|t| !Priority::is_high(t.priority));
    active.truncate(limit);
    active
}

pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

/// Card heading: the priority name, or "Task 0N" by position
pub fn focus_label(task: &Task, index: usize) -> String {
    match task.priority {
        Some(priority) => priority.name().to_uppercase(),
        None => format!("Task 0{}", index + 1),
    }
}

/// Badge text for a priority tag
pub fn priority_badge(priority: Option<Priority>) -> Option<String> {
    priority.map(|p| format!("[{}]", p.name().to_uppercase()))
}
