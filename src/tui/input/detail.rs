use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::task_ops;
use crate::tui::app::{App, Screen};
use crate::tui::form::EditForm;
use crate::tui::list::Row;

/// Page size for PgUp/PgDn scrolling in the detail body
const PAGE: usize = 10;

pub(super) fn handle(app: &mut App, key: KeyEvent) {
    // Delete confirmation intercepts everything
    if app.confirm_delete {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                delete_current(app);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm_delete = false;
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Left => back_to_tasks(app),
        KeyCode::Down | KeyCode::Char('j') => step_task(app, 1),
        KeyCode::Up | KeyCode::Char('k') => step_task(app, -1),
        KeyCode::PageDown => app.detail_scroll = app.detail_scroll.saturating_add(PAGE),
        KeyCode::PageUp => app.detail_scroll = app.detail_scroll.saturating_sub(PAGE),
        KeyCode::Home => app.detail_scroll = 0,
        KeyCode::End => app.detail_scroll = usize::MAX,
        KeyCode::Char('e') => {
            if let Some(id) = app.detail_task.clone()
                && let Some(session) = &app.session
                && let Some(task) = session.tasks.get_task(&id)
            {
                app.edit = Some(EditForm::for_task(task, &session.groups));
                app.edit_return = Screen::Detail;
                app.screen = Screen::Edit;
            }
        }
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('d') => app.confirm_delete = true,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn back_to_tasks(app: &mut App) {
    app.detail_task = None;
    app.detail_scroll = 0;
    app.screen = Screen::Tasks;
    app.rebuild_rows();
}

/// Move to the adjacent task in the list's row order, skipping headers.
fn step_task(app: &mut App, delta: i64) {
    let Some(current) = app.detail_task.clone() else {
        return;
    };
    let task_ids: Vec<&str> = app.rows.iter().filter_map(Row::task_id).collect();
    let Some(pos) = task_ids.iter().position(|id| *id == current) else {
        return;
    };
    let next = pos as i64 + delta;
    if next < 0 || next as usize >= task_ids.len() {
        return;
    }
    let id = task_ids[next as usize].to_string();
    app.cursor = app
        .rows
        .iter()
        .position(|r| r.task_id() == Some(id.as_str()))
        .unwrap_or(app.cursor);
    app.detail_task = Some(id);
    app.detail_scroll = 0;
}

fn cycle_status(app: &mut App) {
    let Some(id) = app.detail_task.clone() else {
        return;
    };
    if let Some(session) = &mut app.session {
        let Some(current) = session.tasks.get_task(&id).map(|t| t.status) else {
            return;
        };
        if let Err(e) = task_ops::set_status(&mut session.tasks, &id, current.cycled()) {
            app.status_message = Some(e.to_string());
        }
        app.rebuild_rows();
    }
}

fn delete_current(app: &mut App) {
    app.confirm_delete = false;
    let Some(id) = app.detail_task.clone() else {
        return;
    };
    if let Some(session) = &mut app.session {
        let result = session
            .tasks
            .delete_task(&id)
            .and_then(|_| session.tasks.save());
        if let Err(e) = result {
            app.status_message = Some(e.to_string());
        }
    }
    back_to_tasks(app);
}
