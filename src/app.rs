use crate::config::Config;
use crate::domain::{
    is_command_input, parse_command, partition, partition_ids, pending_count, top_focus, FocusTimerEngine,
    Priority, Task, TaskListStore, TaskPatch, UiMode, View, FOCUS_SLOTS,
};
use crate::notifications;
use crate::ticker::{TickSource, WallClockTicker};
use anyhow::Result;

/// Inline edit of one task's text
#[derive(Debug, Clone)]
pub struct EditState {
    pub task_id: String,
    pub buffer: String,
}

/// Keyboard drag gesture: a grabbed task and the row it would drop on
#[derive(Debug, Clone)]
pub struct DragState {
    pub source_id: String,
    pub target_id: String,
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Main application state
pub struct AppState<T: TickSource = WallClockTicker> {
    pub view: View,
    pub ui_mode: UiMode,
    pub store: TaskListStore,
    /// Mounted only while the dashboard is shown
    pub timer: Option<FocusTimerEngine<T>>,
    new_ticker: fn() -> T,
    pub selected_index: usize,
    pub input: String,
    pub edit: Option<EditState>,
    pub drag: Option<DragState>,
    pub status: Option<StatusMessage>,
    pub use_emoji: bool,
    pub notifications_enabled: bool,
}

impl AppState<WallClockTicker> {
    pub fn new(store: TaskListStore, view: View, config: &Config) -> Self {
        Self::with_ticker(store, view, config, WallClockTicker::new)
    }
}

impl<T: TickSource> AppState<T> {
    pub fn with_ticker(store: TaskListStore, view: View, config: &Config, new_ticker: fn() -> T) -> Self {
        let timer = match view {
            View::Dashboard => Some(FocusTimerEngine::new(new_ticker())),
            View::List => None,
        };

        Self {
            view,
            ui_mode: UiMode::Normal,
            store,
            timer,
            new_ticker,
            selected_index: 0,
            input: String::new(),
            edit: None,
            drag: None,
            status: None,
            use_emoji: config.ui.use_emoji,
            notifications_enabled: config.notifications.enabled,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Info(message.into()));
    }

    /// Surface a failed action without leaving the UI
    pub fn report_error(&mut self, err: &anyhow::Error) {
        tracing::error!("{:#}", err);
        self.status = Some(StatusMessage::Error(format!("{:#}", err)));
    }

    /// Rows of the list view: active tasks, then completed ones
    pub fn visible_rows(&self) -> Vec<&Task> {
        let (mut active, completed) = partition(self.store.tasks());
        active.extend(completed);
        active
    }

    pub fn active_count(&self) -> usize {
        pending_count(self.store.tasks())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_rows().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    fn select_id(&mut self, id: &str) {
        if let Some(index) = self.visible_rows().iter().position(|t| t.id == id) {
            self.selected_index = index;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_rows().len() {
            self.selected_index += 1;
        }
    }

    /// Switch screens. The target view re-reads the stored list, the way a
    /// freshly mounted page would. Nothing changes when the reload fails.
    pub fn switch_view(&mut self, view: View) -> Result<()> {
        self.store.reload()?;
        self.store.clear_armed_priority();

        if let Some(mut timer) = self.timer.take() {
            timer.reset();
        }
        self.view = view;
        self.ui_mode = UiMode::Normal;
        self.edit = None;
        self.drag = None;
        self.input.clear();
        self.status = None;
        self.selected_index = 0;
        if view == View::Dashboard {
            self.timer = Some(FocusTimerEngine::new((self.new_ticker)()));
        }
        tracing::info!(view = ?view, tasks = self.store.tasks().len(), "view mounted");
        Ok(())
    }

    // --- Input line ---

    pub fn start_adding(&mut self, initial: Option<char>) {
        self.input.clear();
        if let Some(c) = initial {
            self.input.push(c);
        }
        self.ui_mode = UiMode::Adding;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel_adding(&mut self) {
        self.input.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Submit the input line: a slash command arms a priority, anything
    /// else becomes a task. The line stays open for the next entry.
    pub fn submit_input(&mut self) -> Result<()> {
        let input = std::mem::take(&mut self.input);

        if is_command_input(&input) {
            match parse_command(&input) {
                Some(command) => {
                    self.store.apply_command(command);
                    let message = match command.priority() {
                        Some(priority) => format!("Next task: {} priority", priority.name()),
                        None => "Next task: no priority".to_string(),
                    };
                    self.set_status(message);
                }
                None => self.set_status(format!("Unknown command: {}", input.trim())),
            }
            return Ok(());
        }

        if self.store.create(&input)?.is_some() {
            self.status = None;
        }
        Ok(())
    }

    // --- Row actions ---

    pub fn toggle_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };
        self.store.toggle_complete(&id)?;
        self.clamp_selection();
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };
        self.store.delete(&id)?;
        self.clamp_selection();
        Ok(())
    }

    pub fn set_selected_priority(&mut self, priority: Option<Priority>) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };
        self.store.update(&id, &TaskPatch::priority(priority))
    }

    pub fn start_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.edit = Some(EditState {
                task_id: task.id.clone(),
                buffer: task.text.clone(),
            });
            self.ui_mode = UiMode::Editing;
        }
    }

    pub fn edit_add_char(&mut self, c: char) {
        if let Some(edit) = &mut self.edit {
            edit.buffer.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(edit) = &mut self.edit {
            edit.buffer.pop();
        }
    }

    /// Commit the edit. Blank text leaves the task as it was.
    pub fn submit_edit(&mut self) -> Result<()> {
        self.ui_mode = UiMode::Normal;
        let Some(edit) = self.edit.take() else {
            return Ok(());
        };
        self.store.update(&edit.task_id, &TaskPatch::text(edit.buffer))
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- Reordering ---

    /// Neighbour of `id` one row up or down within its own partition
    fn partition_neighbour(&self, id: &str, up: bool) -> Option<String> {
        let task = self.store.get(id)?;
        let ids = partition_ids(self.store.tasks(), task.completed);
        let index = ids.iter().position(|candidate| *candidate == id)?;
        let neighbour = if up { index.checked_sub(1)? } else { index + 1 };
        ids.get(neighbour).map(|s| s.to_string())
    }

    /// Move the selected task one row within its partition
    pub fn move_selected(&mut self, up: bool) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };
        let Some(target) = self.partition_neighbour(&id, up) else {
            return Ok(());
        };
        self.store.reorder(&id, &target)?;
        self.select_id(&id);
        Ok(())
    }

    pub fn start_drag(&mut self) {
        if let Some(id) = self.selected_id() {
            self.drag = Some(DragState {
                source_id: id.clone(),
                target_id: id,
            });
            self.ui_mode = UiMode::Dragging;
        }
    }

    /// Move the drop target; it never leaves the grabbed task's partition
    pub fn drag_move(&mut self, up: bool) {
        let Some(target) = self
            .drag
            .as_ref()
            .and_then(|drag| self.partition_neighbour(&drag.target_id, up))
        else {
            return;
        };
        if let Some(drag) = &mut self.drag {
            drag.target_id = target;
        }
    }

    pub fn drop_drag(&mut self) -> Result<()> {
        self.ui_mode = UiMode::Normal;
        let Some(drag) = self.drag.take() else {
            return Ok(());
        };
        self.store.reorder(&drag.source_id, &drag.target_id)?;
        self.select_id(&drag.source_id);
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- Dashboard ---

    /// Ids of the tasks on the focus cards
    pub fn focus_ids(&self) -> Vec<String> {
        top_focus(self.store.tasks(), FOCUS_SLOTS)
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    /// Toggle the task on focus card `slot` (0-based)
    pub fn toggle_focus_card(&mut self, slot: usize) -> Result<()> {
        let Some(id) = self.focus_ids().get(slot).cloned() else {
            return Ok(());
        };
        self.store.toggle_complete(&id)
    }

    pub fn timer_toggle(&mut self) {
        if let Some(timer) = &mut self.timer {
            timer.toggle();
        }
    }

    pub fn timer_reset(&mut self) {
        if let Some(timer) = &mut self.timer {
            timer.reset();
        }
    }

    /// Apply due timer seconds and announce finished phases
    pub fn tick(&mut self) {
        let Some(timer) = &mut self.timer else {
            return;
        };
        if let Some(finished) = timer.pump() {
            tracing::info!(finished = ?finished, next = ?timer.state().mode, "timer phase complete");
            if self.notifications_enabled {
                notifications::notify_phase_complete(finished);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerMode;
    use crate::persistence::{MemoryDocument, TaskDocument};
    use crate::ticker::ManualTicker;
    use pretty_assertions::assert_eq;

    fn task(id: &str, completed: bool, priority: Option<Priority>) -> Task {
        Task {
            id: id.to_string(),
            text: format!("Task {}", id),
            completed,
            priority,
        }
    }

    fn create_test_app(tasks: Vec<Task>, view: View) -> (AppState<ManualTicker>, MemoryDocument) {
        let doc = MemoryDocument::with_tasks(tasks);
        let store = TaskListStore::mount(Box::new(doc.clone())).unwrap();
        let mut config = Config::default();
        config.notifications.enabled = false;
        let app = AppState::with_ticker(store, view, &config, ManualTicker::new);
        (app, doc)
    }

    fn stored_ids(doc: &MemoryDocument) -> Vec<String> {
        doc.snapshot().into_iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_app_state_new() {
        let (app, _doc) = create_test_app(vec![task("a", false, None)], View::List);
        assert_eq!(app.view, View::List);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.timer.is_none());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_visible_rows_active_first() {
        let (app, _doc) = create_test_app(
            vec![task("a", true, None), task("b", false, None), task("c", false, None)],
            View::List,
        );
        let ids: Vec<&str> = app.visible_rows().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(app.active_count(), 2);
    }

    #[test]
    fn test_submit_input_creates_task() {
        let (mut app, doc) = create_test_app(Vec::new(), View::List);
        app.start_adding(None);
        for c in "Buy milk".chars() {
            app.input_add_char(c);
        }
        app.submit_input().unwrap();

        assert_eq!(doc.snapshot().len(), 1);
        assert_eq!(doc.snapshot()[0].text, "Buy milk");
        assert!(app.input.is_empty());
        assert_eq!(app.ui_mode, UiMode::Adding);
    }

    #[test]
    fn test_slash_command_arms_priority_instead_of_creating() {
        let (mut app, doc) = create_test_app(Vec::new(), View::List);
        app.start_adding(Some('/'));
        app.input_add_char('h');
        app.submit_input().unwrap();

        assert!(doc.snapshot().is_empty());
        assert_eq!(app.store.armed_priority(), Some(Priority::High));

        app.input = "Ship release".to_string();
        app.submit_input().unwrap();
        assert_eq!(doc.snapshot()[0].priority, Some(Priority::High));
        assert!(app.store.armed_priority().is_none());
    }

    #[test]
    fn test_unknown_command_creates_nothing() {
        let (mut app, doc) = create_test_app(Vec::new(), View::List);
        app.input = "/urgent".to_string();
        app.submit_input().unwrap();
        assert!(doc.snapshot().is_empty());
        assert!(matches!(
            &app.status,
            Some(StatusMessage::Info(message)) if message.contains("Unknown command")
        ));
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let (mut app, doc) = create_test_app(Vec::new(), View::List);
        app.input = "    ".to_string();
        app.submit_input().unwrap();
        assert!(doc.snapshot().is_empty());
    }

    #[test]
    fn test_toggle_and_delete_selected() {
        let (mut app, doc) = create_test_app(
            vec![task("a", false, None), task("b", false, None)],
            View::List,
        );
        app.toggle_selected().unwrap();
        assert!(doc.snapshot()[0].completed);

        // "b" is now the first row
        assert_eq!(app.selected_task().unwrap().id, "b");
        app.delete_selected().unwrap();
        assert_eq!(stored_ids(&doc), vec!["a"]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_edit_commit_and_blank_revert() {
        let (mut app, doc) = create_test_app(vec![task("a", false, None)], View::List);

        app.start_edit();
        assert_eq!(app.ui_mode, UiMode::Editing);
        app.edit_backspace();
        app.edit_add_char('!');
        app.submit_edit().unwrap();
        assert_eq!(doc.snapshot()[0].text, "Task !");

        app.start_edit();
        if let Some(edit) = &mut app.edit {
            edit.buffer = "   ".to_string();
        }
        app.submit_edit().unwrap();
        assert_eq!(doc.snapshot()[0].text, "Task !");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_set_selected_priority() {
        let (mut app, doc) = create_test_app(vec![task("a", false, None)], View::List);
        app.set_selected_priority(Some(Priority::Low)).unwrap();
        assert_eq!(doc.snapshot()[0].priority, Some(Priority::Low));
        app.set_selected_priority(None).unwrap();
        assert_eq!(doc.snapshot()[0].priority, None);
    }

    #[test]
    fn test_drag_stays_within_partition() {
        let (mut app, doc) = create_test_app(
            vec![
                task("a", false, None),
                task("x", true, None),
                task("b", false, None),
                task("c", false, None),
            ],
            View::List,
        );

        app.start_drag();
        app.drag_move(false);
        app.drag_move(false);
        // Past the last active task: target stays on "c"
        app.drag_move(false);
        assert_eq!(app.drag.as_ref().unwrap().target_id, "c");

        app.drop_drag().unwrap();
        assert_eq!(stored_ids(&doc), vec!["x", "b", "c", "a"]);
        assert_eq!(app.selected_task().unwrap().id, "a");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_cancel_drag_keeps_order() {
        let (mut app, doc) = create_test_app(
            vec![task("a", false, None), task("b", false, None)],
            View::List,
        );
        app.start_drag();
        app.drag_move(false);
        app.cancel_drag();
        assert!(app.drag.is_none());
        assert_eq!(doc.write_count(), 0);
    }

    #[test]
    fn test_move_selected_within_partition() {
        let (mut app, doc) = create_test_app(
            vec![task("a", false, None), task("b", false, None), task("x", true, None)],
            View::List,
        );
        app.move_selected(false).unwrap();
        assert_eq!(stored_ids(&doc), vec!["b", "a", "x"]);
        assert_eq!(app.selected_task().unwrap().id, "a");

        // "a" is the last active task; it cannot move into the completed section
        app.move_selected(false).unwrap();
        assert_eq!(stored_ids(&doc), vec!["b", "a", "x"]);

        app.move_selected(true).unwrap();
        assert_eq!(stored_ids(&doc), vec!["a", "b", "x"]);
    }

    #[test]
    fn test_dashboard_focus_cards() {
        let (mut app, doc) = create_test_app(
            vec![
                task("P1", false, Some(Priority::Low)),
                task("P2", false, Some(Priority::High)),
                task("P3", false, None),
                task("P4", false, Some(Priority::High)),
            ],
            View::Dashboard,
        );
        assert_eq!(app.focus_ids(), vec!["P2", "P4", "P1"]);

        app.toggle_focus_card(1).unwrap();
        assert!(doc.snapshot()[3].completed);
        assert_eq!(app.focus_ids(), vec!["P2", "P1", "P3"]);

        // Out of range slot is ignored
        app.toggle_focus_card(5).unwrap();
    }

    #[test]
    fn test_dashboard_timer_runs_on_ticks() {
        let (mut app, _doc) = create_test_app(Vec::new(), View::Dashboard);
        app.timer_toggle();

        let timer = app.timer.as_mut().unwrap();
        timer.ticker_mut().advance(1500);
        app.tick();
        let state = app.timer.as_ref().unwrap().state();
        assert_eq!(state.mode, TimerMode::Break);
        assert!(state.running);

        app.timer_reset();
        let state = app.timer.as_ref().unwrap().state();
        assert_eq!(state.mode, TimerMode::Focus);
        assert!(!state.running);
    }

    #[test]
    fn test_failed_save_is_reported_and_change_kept() {
        let (mut app, doc) = create_test_app(vec![task("a", false, None)], View::List);
        doc.set_failing(true);

        let err = app.toggle_selected().unwrap_err();
        app.report_error(&err);

        assert!(matches!(
            &app.status,
            Some(StatusMessage::Error(message)) if message.contains("storage unavailable")
        ));
        // The in-memory list keeps the change; the stored one does not
        assert!(app.store.tasks()[0].completed);
        assert!(!doc.snapshot()[0].completed);

        // Once storage recovers the next mutation writes everything
        doc.set_failing(false);
        app.set_selected_priority(Some(Priority::High)).unwrap();
        assert!(doc.snapshot()[0].completed);
    }

    #[test]
    fn test_failed_switch_keeps_dashboard_mounted() {
        let (mut app, doc) = create_test_app(vec![task("a", false, None)], View::Dashboard);
        app.timer_toggle();
        doc.set_failing(true);

        assert!(app.switch_view(View::List).is_err());
        assert_eq!(app.view, View::Dashboard);
        let timer = app.timer.as_ref().unwrap();
        assert!(timer.is_running());
    }

    #[test]
    fn test_switch_view_disarms_priority() {
        let (mut app, _doc) = create_test_app(Vec::new(), View::List);
        app.input = "/low".to_string();
        app.submit_input().unwrap();
        assert_eq!(app.store.armed_priority(), Some(Priority::Low));

        app.switch_view(View::Dashboard).unwrap();
        app.switch_view(View::List).unwrap();
        assert!(app.store.armed_priority().is_none());
    }

    #[test]
    fn test_switch_view_remounts() {
        let (mut app, doc) = create_test_app(vec![task("a", false, None)], View::List);

        // Another writer changes the stored list meanwhile
        doc.save(&[task("a", false, None), task("b", false, None)]).unwrap();

        app.switch_view(View::Dashboard).unwrap();
        assert_eq!(app.store.tasks().len(), 2);
        assert!(app.timer.is_some());

        app.switch_view(View::List).unwrap();
        assert!(app.timer.is_none());
    }
}
