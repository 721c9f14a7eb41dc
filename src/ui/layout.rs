use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// List view layout
pub struct ListLayout {
    pub keybindings_area: Rect,
    pub input_area: Rect,
    pub todo_area: Rect,
    pub completed_area: Rect,
    pub status_area: Rect,
}

/// Dashboard layout
pub struct DashboardLayout {
    pub keybindings_area: Rect,
    pub timer_area: Rect,
    pub cards_area: Rect,
    pub status_area: Rect,
}

/// Create the list view layout
/// - Top bar: keybindings (1 row)
/// - Input line with command palette
/// - To Do (65%) above Completed (35%)
/// - Bottom bar: status (1 row)
pub fn create_list_layout(area: Rect, palette_rows: u16) -> ListLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // Keybindings bar
            Constraint::Length(3 + palette_rows), // Input line + palette
            Constraint::Min(0),                   // Sections
            Constraint::Length(1),                // Status bar
        ])
        .split(area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    ListLayout {
        keybindings_area: chunks[0],
        input_area: chunks[1],
        todo_area: sections[0],
        completed_area: sections[1],
        status_area: chunks[3],
    }
}

/// Create the dashboard layout: timer panel on top, focus cards below
pub fn create_dashboard_layout(area: Rect) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(8), // Timer
            Constraint::Min(0),    // Focus cards
            Constraint::Length(1), // Pending count / status
        ])
        .split(area);

    DashboardLayout {
        keybindings_area: chunks[0],
        timer_area: chunks[1],
        cards_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Split the cards area into `slots` equal columns
pub fn create_card_areas(area: Rect, slots: usize) -> Vec<Rect> {
    if slots == 0 {
        return Vec::new();
    }
    let constraints: Vec<Constraint> = (0..slots)
        .map(|_| Constraint::Ratio(1, slots as u32))
        .collect();

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}
