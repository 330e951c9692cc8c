mod detail;
mod edit;
mod groups;
mod projects;
mod tasks;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Screen};

/// Handle a key event on the current screen
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Any keypress clears a lingering status message
    app.status_message = None;

    match app.screen {
        Screen::Projects => projects::handle(app, key),
        Screen::Tasks => tasks::handle(app, key),
        Screen::Detail => detail::handle(app, key),
        Screen::Edit => edit::handle(app, key),
        Screen::Groups => groups::handle(app, key),
        Screen::GroupEdit => groups::handle_edit(app, key),
    }
}
