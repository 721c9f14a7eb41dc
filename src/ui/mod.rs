pub mod dashboard_pane;
pub mod done_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::{AppState, StatusMessage};
use crate::domain::View;
use crate::ticker::TickSource;
use dashboard_pane::{dashboard_footer, render_dashboard};
use done_pane::render_done_pane;
use input_form::{palette_entries, render_input_form};
use keybindings::render_keybindings;
use layout::{create_dashboard_layout, create_list_layout};
use list_pane::render_list_pane;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{error_style, hint_style, title_style};

/// Main render function - draws the mounted view
pub fn render<T: TickSource>(f: &mut Frame, app: &AppState<T>) {
    let size = f.size();

    match app.view {
        View::List => {
            let palette_rows = palette_entries(&app.input).len() as u16;
            let layout = create_list_layout(size, palette_rows);

            render_keybindings(f, layout.keybindings_area, app.view, app.ui_mode);
            render_input_form(f, app, layout.input_area);
            render_list_pane(f, app, layout.todo_area);
            render_done_pane(f, app, layout.completed_area);
            render_status_bar(f, app, None, layout.status_area);
        }
        View::Dashboard => {
            let layout = create_dashboard_layout(size);

            render_keybindings(f, layout.keybindings_area, app.view, app.ui_mode);
            render_dashboard(f, app, layout.timer_area, layout.cards_area);
            render_status_bar(f, app, Some(dashboard_footer(app)), layout.status_area);
        }
    }
}

/// Bottom bar: an optional lead text followed by the last status message
fn render_status_bar<T: TickSource>(f: &mut Frame, app: &AppState<T>, lead: Option<String>, area: Rect) {
    let mut spans = Vec::new();

    if let Some(lead) = lead {
        spans.push(Span::styled(format!(" {}   ", lead), title_style()));
    }

    match &app.status {
        Some(StatusMessage::Info(message)) => spans.push(Span::styled(format!(" {}", message), hint_style())),
        Some(StatusMessage::Error(message)) => {
            spans.push(Span::styled(format!(" Error: {}", message), error_style()))
        }
        None => {}
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
