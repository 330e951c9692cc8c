use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.projects_cursor = app.projects_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.projects_cursor + 1 < app.projects.len() {
                app.projects_cursor += 1;
            }
        }
        KeyCode::Home => app.projects_cursor = 0,
        KeyCode::End => {
            app.projects_cursor = app.projects.len().saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Right => {
            if let Some(project) = app.projects.get(app.projects_cursor) {
                let name = project.name.clone();
                app.open_project(&name);
            }
        }
        KeyCode::Char('r') => app.refresh_projects(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}
