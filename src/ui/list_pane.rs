use crate::app::{AppState, DragState, EditState};
use crate::domain::{partition, priority_badge, Task, UiMode};
use crate::ticker::TickSource;
use crate::ui::styles::{
    border_style, default_style, done_style, drop_target_style, hint_style, priority_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub const EMPTY_TODO_TEXT: &str = "No pending tasks. Start building...";

fn checkbox(completed: bool, use_emoji: bool) -> &'static str {
    match (completed, use_emoji) {
        (true, true) => "✅ ",
        (false, true) => "⬜ ",
        (true, false) => "[x] ",
        (false, false) => "[ ] ",
    }
}

/// Create the line for one task row
pub fn create_task_line<'a>(
    task: &'a Task,
    use_emoji: bool,
    edit: Option<&'a EditState>,
    drag: Option<&DragState>,
) -> Line<'a> {
    let mut spans = Vec::new();

    let grabbed = drag.is_some_and(|d| d.source_id == task.id);
    spans.push(Span::raw(if grabbed { "≡ " } else { "  " }));
    spans.push(Span::raw(checkbox(task.completed, use_emoji)));

    match edit.filter(|e| e.task_id == task.id) {
        Some(edit) => {
            spans.push(Span::styled(edit.buffer.as_str(), title_style()));
            spans.push(Span::styled("█", title_style()));
        }
        None => {
            let text_style = if task.completed { done_style() } else { default_style() };
            spans.push(Span::styled(task.text.as_str(), text_style));
        }
    }

    if let (Some(badge), Some(priority)) = (priority_badge(task.priority), task.priority) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(badge, priority_style(priority)));
    }

    Line::from(spans)
}

/// Build list rows for a section whose first row has index `offset`
/// in the app's visible rows
pub fn section_items<'a, T: TickSource>(
    app: &'a AppState<T>,
    tasks: &[&'a Task],
    offset: usize,
) -> Vec<ListItem<'a>> {
    let drag = app.drag.as_ref();

    tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(*task, app.use_emoji, app.edit.as_ref(), drag);
            let is_target = app.ui_mode == UiMode::Dragging
                && drag.is_some_and(|d| d.target_id == task.id && d.source_id != task.id);
            let style = if is_target {
                drop_target_style()
            } else if offset + idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect()
}

/// Render the "To Do" section
pub fn render_list_pane<T: TickSource>(f: &mut Frame, app: &AppState<T>, area: Rect) {
    let title = format!(" To Do ({}) ", app.active_count());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    let (active, _) = partition(app.store.tasks());
    if active.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(EMPTY_TODO_TEXT, hint_style())))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items = section_items(app, &active, 0);
    f.render_widget(List::new(items).block(block), area);
}
