use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::group::TaskGroup;
use crate::tui::app::{App, Screen};
use crate::tui::form::GroupEditForm;

pub(super) fn handle(app: &mut App, key: KeyEvent) {
    let Some(session) = &mut app.session else {
        app.screen = Screen::Projects;
        return;
    };
    let group_count = session.groups.groups.len();

    // Delete confirmation intercepts everything
    if app.groups_confirm_delete {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(group) = session.groups.groups.get(app.groups_cursor) {
                    let name = group.name.clone();
                    session.groups.delete_group(&name);
                    if let Err(e) = session.groups.save() {
                        app.status_message = Some(e.to_string());
                    }
                    app.groups_cursor = app
                        .groups_cursor
                        .min(session.groups.groups.len().saturating_sub(1));
                }
                app.groups_confirm_delete = false;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.groups_confirm_delete = false;
            }
            _ => {}
        }
        return;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Up if shift => move_up(app),
        KeyCode::Down if shift => move_down(app),
        KeyCode::Up | KeyCode::Char('k') => {
            app.groups_cursor = app.groups_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.groups_cursor + 1 < group_count {
                app.groups_cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(group) = session.groups.groups.get(app.groups_cursor) {
                app.group_edit = Some(GroupEditForm::for_group(group));
                app.screen = Screen::GroupEdit;
            }
        }
        KeyCode::Char('n') => {
            app.group_edit = Some(GroupEditForm::new_group());
            app.screen = Screen::GroupEdit;
        }
        KeyCode::Char('d') => {
            if group_count > 0 {
                app.groups_confirm_delete = true;
            }
        }
        KeyCode::Char('K') => move_up(app),
        KeyCode::Char('J') => move_down(app),
        KeyCode::Esc => {
            app.screen = Screen::Tasks;
            app.rebuild_rows();
        }
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn move_up(app: &mut App) {
    let Some(session) = &mut app.session else {
        return;
    };
    let Some(name) = session
        .groups
        .groups
        .get(app.groups_cursor)
        .map(|g| g.name.clone())
    else {
        return;
    };
    if session.groups.move_group_up(&name) {
        if let Err(e) = session.groups.save() {
            app.status_message = Some(e.to_string());
        }
        app.groups_cursor = app.groups_cursor.saturating_sub(1);
    }
}

fn move_down(app: &mut App) {
    let Some(session) = &mut app.session else {
        return;
    };
    let Some(name) = session
        .groups
        .groups
        .get(app.groups_cursor)
        .map(|g| g.name.clone())
    else {
        return;
    };
    if session.groups.move_group_down(&name) {
        if let Err(e) = session.groups.save() {
            app.status_message = Some(e.to_string());
        }
        if app.groups_cursor + 1 < session.groups.groups.len() {
            app.groups_cursor += 1;
        }
    }
}

/// Keys for the group create/edit screen
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.group_edit else {
        app.screen = Screen::Groups;
        return;
    };

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => save_group(app),
        KeyCode::Char('s') if ctrl => save_group(app),
        KeyCode::Esc => {
            app.group_edit = None;
            app.screen = Screen::Groups;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            form.focus = 1 - form.focus;
        }
        KeyCode::Left if form.focus == 1 => {
            form.color_idx = form.color_idx.saturating_sub(1);
        }
        KeyCode::Right if form.focus == 1 => {
            if form.color_idx + 1 < crate::model::group::DEFAULT_COLORS.len() {
                form.color_idx += 1;
            }
        }
        _ => {
            if form.focus == 0 {
                form.name.handle_key(key);
            }
        }
    }
}

fn save_group(app: &mut App) {
    let Some(form) = &app.group_edit else {
        return;
    };
    let name = form.name.value.trim().to_string();
    if name.is_empty() {
        app.status_message = Some("group name cannot be empty".to_string());
        return;
    }
    let color = form.selected_color().to_string();
    let original = form.original.clone();

    let Some(session) = &mut app.session else {
        return;
    };
    match original {
        Some(existing) => {
            session.groups.update_group(
                &existing.name,
                TaskGroup {
                    name,
                    order: existing.order,
                    color,
                },
            );
        }
        None => {
            session.groups.add_group(TaskGroup {
                name,
                order: 0,
                color,
            });
        }
    }
    if let Err(e) = session.groups.save() {
        app.status_message = Some(e.to_string());
    }
    app.group_edit = None;
    app.screen = Screen::Groups;
}
