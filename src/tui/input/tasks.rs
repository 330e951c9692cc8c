use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::TaskStatus;
use crate::ops::task_ops;
use crate::tui::app::{App, Screen};
use crate::tui::form::EditForm;

pub(super) fn handle(app: &mut App, key: KeyEvent) {
    // Live search intercepts typing until dismissed
    if app.search_active {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.search_active = false;
            }
            _ => {
                if app.search_input.handle_key(key) {
                    app.filters.query = app.search_input.value.clone();
                    app.rebuild_rows();
                }
            }
        }
        return;
    }

    // Quick status change: the next key picks the new status
    if app.status_pick {
        let picked = match key.code {
            KeyCode::Char('1') | KeyCode::Char('p') => Some(TaskStatus::Pending),
            KeyCode::Char('2') | KeyCode::Char('i') => Some(TaskStatus::InProgress),
            KeyCode::Char('3') | KeyCode::Char('c') => Some(TaskStatus::Completed),
            _ => None,
        };
        app.status_pick = false;
        if let Some(status) = picked {
            set_selected_status(app, status);
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.cursor + 1 < app.rows.len() {
                app.cursor += 1;
            }
        }
        KeyCode::Home => app.cursor = 0,
        KeyCode::End => app.cursor = app.rows.len().saturating_sub(1),
        KeyCode::Enter => {
            if let Some(name) = app.selected_group_header().map(str::to_string) {
                // Toggle collapse
                if !app.collapsed.remove(&name) {
                    app.collapsed.insert(name);
                }
                app.rebuild_rows();
            } else if let Some(id) = app.selected_task_id().map(str::to_string) {
                open_detail(app, id);
            }
        }
        KeyCode::Right => {
            if let Some(id) = app.selected_task_id().map(str::to_string) {
                open_detail(app, id);
            }
        }
        KeyCode::Char('n') => {
            if let Some(session) = &app.session {
                app.edit = Some(EditForm::new_task(&session.groups));
                app.edit_return = Screen::Tasks;
                app.screen = Screen::Edit;
            }
        }
        KeyCode::Char('e') => {
            if let Some(task) = app.selected_task().cloned()
                && let Some(session) = &app.session
            {
                app.edit = Some(EditForm::for_task(&task, &session.groups));
                app.edit_return = Screen::Tasks;
                app.screen = Screen::Edit;
            }
        }
        KeyCode::Char('s') => {
            if app.selected_task_id().is_some() {
                app.status_pick = true;
            }
        }
        KeyCode::Char('f') => {
            app.filters.cycle_status();
            app.rebuild_rows();
        }
        KeyCode::Char('g') => {
            if let Some(session) = &app.session {
                let names = session.groups.group_names();
                app.filters.cycle_group(&names);
                app.rebuild_rows();
            }
        }
        KeyCode::Char('h') => {
            app.filters.hide_completed = !app.filters.hide_completed;
            app.rebuild_rows();
        }
        KeyCode::Char('G') => {
            if app.session.is_some() {
                app.groups_cursor = 0;
                app.groups_confirm_delete = false;
                app.screen = Screen::Groups;
            }
        }
        KeyCode::Char('/') => {
            app.search_active = true;
        }
        KeyCode::Char('r') => {
            app.reload_project();
        }
        KeyCode::Esc | KeyCode::Left | KeyCode::Char('p') => {
            app.close_project();
        }
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn open_detail(app: &mut App, id: String) {
    app.detail_task = Some(id);
    app.detail_scroll = 0;
    app.confirm_delete = false;
    app.screen = Screen::Detail;
}

fn set_selected_status(app: &mut App, status: TaskStatus) {
    let Some(id) = app.selected_task_id().map(str::to_string) else {
        return;
    };
    if let Some(session) = &mut app.session {
        if let Err(e) = task_ops::set_status(&mut session.tasks, &id, status) {
            app.status_message = Some(e.to_string());
        }
        app.rebuild_rows();
    }
}
