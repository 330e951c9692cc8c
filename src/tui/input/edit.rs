use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops;
use crate::tui::app::{App, Screen};
use crate::tui::form::EditField;

pub(super) fn handle(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.edit else {
        app.screen = Screen::Tasks;
        return;
    };

    // Task picker intercepts everything while open
    if form.picker.is_some() {
        handle_picker(app, key);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => save(app),
        KeyCode::Esc => cancel(app),
        KeyCode::Tab => {
            form.focus = form.focus.next();
        }
        KeyCode::BackTab => {
            form.focus = form.focus.prev();
        }
        KeyCode::Char('/')
            if matches!(form.focus, EditField::Blocks | EditField::BlockedBy) =>
        {
            if let Some(session) = &app.session {
                form.open_picker(&session.tasks);
            }
        }
        KeyCode::Up | KeyCode::Down => match form.focus {
            EditField::Status => {
                if key.code == KeyCode::Up {
                    form.status_idx = form.status_idx.saturating_sub(1);
                } else if form.status_idx + 1 < crate::model::task::TaskStatus::ALL.len() {
                    form.status_idx += 1;
                }
            }
            EditField::Group => {
                if key.code == KeyCode::Up {
                    form.group_idx = form.group_idx.saturating_sub(1);
                } else if form.group_idx + 1 < form.group_options.len() {
                    form.group_idx += 1;
                }
            }
            EditField::Description => {
                form.description.handle_key(key);
            }
            _ => {}
        },
        _ => {
            // Route everything else to the focused input
            match form.focus {
                EditField::Subject => {
                    form.subject.handle_key(key);
                }
                EditField::Description => {
                    form.description.handle_key(key);
                }
                EditField::Owner => {
                    form.owner.handle_key(key);
                }
                EditField::Blocks => {
                    form.blocks.handle_key(key);
                }
                EditField::BlockedBy => {
                    form.blocked_by.handle_key(key);
                }
                EditField::Status | EditField::Group => {}
            }
        }
    }
}

fn handle_picker(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.edit else {
        return;
    };
    let Some(picker) = &mut form.picker else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            form.picker = None;
        }
        KeyCode::Enter => picker.toggle_current(),
        KeyCode::Tab => form.apply_picker(),
        KeyCode::Up => picker.cursor = picker.cursor.saturating_sub(1),
        KeyCode::Down => {
            if picker.cursor + 1 < picker.matches.len() {
                picker.cursor += 1;
            }
        }
        _ => {
            if picker.search.handle_key(key)
                && let Some(session) = &app.session
            {
                let editing = form.task_id.clone();
                if let Some(picker) = &mut form.picker {
                    picker.refresh(&session.tasks, editing.as_deref());
                }
            }
        }
    }
}

fn save(app: &mut App) {
    let Some(form) = &app.edit else {
        return;
    };
    let task = form.build_task();
    let is_new = form.task_id.is_none();

    let Some(session) = &mut app.session else {
        return;
    };
    let result = if is_new {
        task_ops::create_task(&mut session.tasks, &mut session.groups, task).map(|_| ())
    } else {
        task_ops::apply_update(&mut session.tasks, &mut session.groups, task)
    };

    match result {
        Ok(()) => {
            app.edit = None;
            app.screen = Screen::Tasks;
            app.detail_task = None;
            app.rebuild_rows();
        }
        // Validation failures keep the form open so nothing typed is lost
        Err(e) => app.status_message = Some(e.to_string()),
    }
}

fn cancel(app: &mut App) {
    app.edit = None;
    app.screen = app.edit_return;
    if app.screen == Screen::Tasks {
        app.rebuild_rows();
    }
}
