use crate::app::AppState;
use crate::domain::{is_command_input, matching_commands, priority_badge, CommandToken, UiMode};
use crate::ticker::TickSource;
use crate::ui::styles::{border_style, hint_style, priority_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Commands to list under the input line while a command is being typed
pub fn palette_entries(input: &str) -> Vec<CommandToken> {
    if is_command_input(input) {
        matching_commands(input)
    } else {
        Vec::new()
    }
}

/// Render the task input line with the command palette below it
pub fn render_input_form<T: TickSource>(f: &mut Frame, app: &AppState<T>, area: Rect) {
    let focused = app.ui_mode == UiMode::Adding;
    let mut lines = Vec::new();

    if focused {
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(app.input.as_str(), title_style()),
            Span::styled("█", title_style()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "> Type '/' for commands or add a task...",
            hint_style(),
        )));
    }

    for command in palette_entries(&app.input) {
        lines.push(Line::from(vec![
            Span::styled(format!("  /{:<8}", command.name()), title_style()),
            Span::styled(command.hint(), hint_style()),
        ]));
    }

    let mut title = vec![Span::styled(" New Task ", title_style())];
    if let Some(armed) = app.store.armed_priority() {
        if let Some(badge) = priority_badge(Some(armed)) {
            title.push(Span::styled(format!("{} ", badge), priority_style(armed)));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Line::from(title)),
    );
    f.render_widget(paragraph, area);
}
