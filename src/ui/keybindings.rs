use crate::domain::{UiMode, View};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current view and input mode
pub fn hints(view: View, mode: UiMode) -> Vec<&'static str> {
    match (view, mode) {
        (View::Dashboard, _) => vec![
            " Enter/s start/pause   ",
            "r reset   ",
            "1-3 complete card   ",
            "b back   ",
            "q quit",
        ],
        (View::List, UiMode::Adding) => vec![
            " Enter add   ",
            "/high /medium /low /clear set priority   ",
            "Esc close",
        ],
        (View::List, UiMode::Editing) => vec![" Enter save   ", "Esc cancel"],
        (View::List, UiMode::Dragging) => vec![" ↑/↓ move   ", "Enter drop   ", "Esc cancel"],
        (View::List, UiMode::Normal) => vec![
            " ↑/↓ select   ",
            "Shift+↑/↓ reorder   ",
            "g drag   ",
            "a add   ",
            "/ command   ",
            "Space done   ",
            "e edit   ",
            "1/2/3/0 priority   ",
            "x delete   ",
            "f focus   ",
            "q quit",
        ],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, view: View, mode: UiMode) {
    let spans: Vec<Span> = hints(view, mode).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
