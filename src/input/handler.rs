use crate::app::AppState;
use crate::domain::{Priority, UiMode, View};
use crate::ticker::TickSource;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key<T: TickSource>(app: &mut AppState<T>, key: KeyEvent) -> Result<bool> {
    match (app.view, app.ui_mode) {
        (View::Dashboard, _) => handle_dashboard(app, key),
        (View::List, UiMode::Normal) => handle_normal_mode(app, key),
        (View::List, UiMode::Adding) => handle_adding_mode(app, key),
        (View::List, UiMode::Editing) => handle_editing_mode(app, key),
        (View::List, UiMode::Dragging) => handle_dragging_mode(app, key),
    }
}

/// Handle keys in the list view when no input is focused
fn handle_normal_mode<T: TickSource>(app: &mut AppState<T>, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up | KeyCode::Char('k') => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_selected(true)?;
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_selected(false)?;
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.start_adding(None);
            Ok(false)
        }
        // Open the input with the command prefix already typed
        KeyCode::Char('/') => {
            app.start_adding(Some('/'));
            Ok(false)
        }

        KeyCode::Char(' ') => {
            app.toggle_selected()?;
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected()?;
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit();
            Ok(false)
        }

        KeyCode::Char('1') => {
            app.set_selected_priority(Some(Priority::High))?;
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.set_selected_priority(Some(Priority::Medium))?;
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.set_selected_priority(Some(Priority::Low))?;
            Ok(false)
        }
        KeyCode::Char('0') => {
            app.set_selected_priority(None)?;
            Ok(false)
        }

        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.start_drag();
            Ok(false)
        }

        KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Tab => {
            app.switch_view(View::Dashboard)?;
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys while the add/command input line is focused
fn handle_adding_mode<T: TickSource>(app: &mut AppState<T>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input()?;
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_adding();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),
        KeyCode::Char(c) => {
            app.input_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn handle_editing_mode<T: TickSource>(app: &mut AppState<T>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_edit()?;
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_edit();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.edit_backspace();
            Ok(false)
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),
        KeyCode::Char(c) => {
            app.edit_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn handle_dragging_mode<T: TickSource>(app: &mut AppState<T>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.drag_move(true);
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.drag_move(false);
            Ok(false)
        }
        KeyCode::Enter | KeyCode::Char('g') | KeyCode::Char(' ') => {
            app.drop_drag()?;
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_drag();
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys on the focus dashboard
fn handle_dashboard<T: TickSource>(app: &mut AppState<T>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char(' ') => {
            app.timer_toggle();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.timer_reset();
            Ok(false)
        }
        KeyCode::Char(c @ '1'..='3') => {
            let slot = c as usize - '1' as usize;
            app.toggle_focus_card(slot)?;
            Ok(false)
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc | KeyCode::Tab => {
            app.switch_view(View::List)?;
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),
        _ => Ok(false),
    }
}
