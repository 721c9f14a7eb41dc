use crate::app::AppState;
use crate::domain::partition;
use crate::ticker::TickSource;
use crate::ui::list_pane::section_items;
use crate::ui::styles::{border_style, title_style};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List},
    Frame,
};

/// Render the "Completed" section. Rows continue the selection index
/// after the active tasks.
pub fn render_done_pane<T: TickSource>(f: &mut Frame, app: &AppState<T>, area: Rect) {
    let (active, completed) = partition(app.store.tasks());
    let items = section_items(app, &completed, active.len());

    let title = format!(" Completed ({}) ", completed.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
