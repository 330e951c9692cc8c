pub mod detail_view;
pub mod edit_view;
pub mod groups_view;
pub mod helpers;
pub mod projects_view;
pub mod tasks_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::tui::app::{App, Screen};

/// Main render function that dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    helpers::render_title_bar(frame, app, chunks[0]);

    match app.screen {
        Screen::Projects => projects_view::render(frame, app, chunks[1]),
        Screen::Tasks => tasks_view::render(frame, app, chunks[1]),
        Screen::Detail => detail_view::render(frame, app, chunks[1]),
        Screen::Edit => edit_view::render(frame, app, chunks[1]),
        Screen::Groups => groups_view::render(frame, app, chunks[1]),
        Screen::GroupEdit => groups_view::render_edit(frame, app, chunks[1]),
    }

    helpers::render_status_row(frame, app, chunks[2]);
}
