use crate::app::AppState;
use crate::domain::{focus_label, pending_count, top_focus, Task, TimerState, FOCUS_SLOTS};
use crate::ticker::TickSource;
use crate::ui::layout::create_card_areas;
use crate::ui::styles::{
    border_style, default_style, gauge_style, hint_style, paused_style, priority_style,
    running_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// "N Tasks Pending"
pub fn pending_text(count: usize) -> String {
    format!("{} Tasks Pending", count)
}

fn timer_heading(state: &TimerState, use_emoji: bool) -> String {
    let label = state.phase_label();
    let status = if state.running { "Running" } else { "Paused" };
    if use_emoji {
        format!("{} {} - {}", state.mode.symbol(), label, status)
    } else {
        format!("{} - {}", label, status)
    }
}

/// Render the timer panel: phase label, MM:SS and a progress gauge
pub fn render_timer_pane(f: &mut Frame, state: &TimerState, use_emoji: bool, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Focus Timer ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Phase label
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // MM:SS
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    let status_style = if state.running { running_style() } else { paused_style() };
    f.render_widget(
        Paragraph::new(Span::styled(timer_heading(state, use_emoji), status_style))
            .alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(state.display(), title_style())).alignment(Alignment::Center),
        chunks[2],
    );

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(state.progress().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[4]);
}

fn render_card(f: &mut Frame, task: &Task, index: usize, area: Rect) {
    let label_style = match task.priority {
        Some(priority) => priority_style(priority),
        None => hint_style(),
    };
    let lines = vec![
        Line::from(Span::styled(focus_label(task, index), label_style)),
        Line::raw(""),
        Line::from(Span::styled(task.text.as_str(), default_style())),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(format!(" {} ", index + 1), title_style())),
    );
    f.render_widget(paragraph, area);
}

/// Render the top focus tasks as cards
pub fn render_focus_cards(f: &mut Frame, tasks: &[Task], area: Rect) {
    let focus = top_focus(tasks, FOCUS_SLOTS);
    if focus.is_empty() {
        let empty = Span::styled("Nothing to focus on. Add tasks in the list view.", hint_style());
        let paragraph = Paragraph::new(empty)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style()));
        f.render_widget(paragraph, area);
        return;
    }

    for (index, (task, card_area)) in focus
        .iter()
        .zip(create_card_areas(area, FOCUS_SLOTS))
        .enumerate()
    {
        render_card(f, task, index, card_area);
    }
}

/// Render the whole dashboard body
pub fn render_dashboard<T: TickSource>(f: &mut Frame, app: &AppState<T>, timer_area: Rect, cards_area: Rect) {
    if let Some(timer) = &app.timer {
        render_timer_pane(f, &timer.state(), app.use_emoji, timer_area);
    }
    render_focus_cards(f, app.store.tasks(), cards_area);
}

/// Pending count shown in the dashboard footer
pub fn dashboard_footer<T: TickSource>(app: &AppState<T>) -> String {
    pending_text(pending_count(app.store.tasks()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerMode;

    #[test]
    fn test_pending_text() {
        assert_eq!(pending_text(0), "0 Tasks Pending");
        assert_eq!(pending_text(3), "3 Tasks Pending");
    }

    #[test]
    fn test_timer_heading() {
        let state = TimerState {
            remaining: 300,
            mode: TimerMode::Break,
            running: true,
        };
        assert_eq!(timer_heading(&state, false), "Short Break - Running");
        assert_eq!(timer_heading(&state, true), "☕ Short Break - Running");
    }
}
