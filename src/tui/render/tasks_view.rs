use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::group::UNCATEGORIZED;
use crate::model::task::{Task, TaskStatus};
use crate::tui::app::{App, Session};
use crate::tui::list::{Row, resolved_group};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the task list screen: filter bar, rows, scroll indicators
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filter bar
            Constraint::Length(1), // mode banner / spacer
            Constraint::Min(1),    // list
        ])
        .split(area);

    render_filter_bar(frame, app, chunks[0]);
    render_banner(frame, app, chunks[1]);
    render_list(frame, app, chunks[2]);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let status_label = app
        .filters
        .status
        .map(TaskStatus::as_str)
        .unwrap_or("all");
    let group_label = app.filters.group.as_deref().unwrap_or("all groups");
    let completed_label = if app.filters.hide_completed {
        "hidden"
    } else {
        "shown"
    };

    let line1 = Line::from(Span::styled(
        format!(" status (f): [{status_label:<11}]   group (g): [{group_label}]"),
        Style::default().fg(theme.muted),
    ));
    let search_label = if app.filters.query.is_empty() {
        String::new()
    } else {
        format!("   search (/): {}", app.filters.query)
    };
    let line2 = Line::from(Span::styled(
        format!(" completed (h): [{completed_label}]{search_label}"),
        Style::default().fg(theme.muted),
    ));

    let paragraph =
        Paragraph::new(vec![line1, line2]).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.status_pick {
        Line::from(Span::styled(
            " change status: [1/p] pending  [2/i] in_progress  [3/c] completed  [Esc] cancel",
            Style::default().fg(app.theme.warning),
        ))
    } else {
        Line::default()
    };
    let paragraph = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(session) = &app.session else {
        return;
    };
    let theme = &app.theme;
    let height = area.height as usize;
    let width = area.width as usize;

    if app.rows.is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                " No tasks match.",
                Style::default().fg(theme.muted),
            )),
            Line::from(Span::styled(
                " Press 'n' to create a task.",
                Style::default().fg(theme.muted),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.background)),
            area,
        );
        return;
    }

    // Keep the cursor inside the visible window. Reserve two rows for the
    // scroll indicators.
    let window = height.saturating_sub(2).max(1);
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    }
    if app.cursor >= app.scroll + window {
        app.scroll = app.cursor + 1 - window;
    }
    let start = app.scroll.min(app.rows.len().saturating_sub(1));
    let end = (start + window).min(app.rows.len());

    let mut lines = Vec::with_capacity(height);
    if start > 0 {
        lines.push(Line::from(Span::styled(
            format!("   ↑ {start} more above"),
            Style::default().fg(theme.muted),
        )));
    }

    for (i, row) in app.rows[start..end].iter().enumerate() {
        let selected = start + i == app.cursor;
        match row {
            Row::GroupHeader(name) => {
                lines.push(group_header_line(app, session, name, selected));
            }
            Row::Task(id) => {
                if let Some(task) = session.tasks.get_task(id) {
                    lines.push(task_line(app, task, selected, width));
                    if !task.blocked_by.is_empty() {
                        lines.push(Line::from(Span::styled(
                            format!("       └─ blocked by: {}", task.blocked_by.join(", ")),
                            Style::default()
                                .fg(theme.muted)
                                .add_modifier(Modifier::ITALIC),
                        )));
                    }
                }
            }
        }
    }

    let remaining = app.rows.len() - end;
    if remaining > 0 {
        lines.push(Line::from(Span::styled(
            format!("   ↓ {remaining} more below"),
            Style::default().fg(theme.muted),
        )));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}

fn group_header_line<'a>(
    app: &App,
    session: &Session,
    name: &str,
    selected: bool,
) -> Line<'a> {
    let theme = &app.theme;

    // Status tallies over the whole store, not just filtered rows
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    for task in &session.tasks.tasks {
        if resolved_group(task) == name {
            match task.status {
                TaskStatus::Pending => pending += 1,
                TaskStatus::InProgress => in_progress += 1,
                TaskStatus::Completed => completed += 1,
            }
        }
    }
    let total = pending + in_progress + completed;

    let color = if name == UNCATEGORIZED {
        theme.muted
    } else {
        theme.group_color(session.groups.group_color(name))
    };
    let arrow = if app.collapsed.contains(name) {
        "▶"
    } else {
        "▼"
    };
    let prefix = if selected { " > " } else { "   " };
    let header_style = if selected {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled(format!("{prefix}{arrow} "), header_style),
        Span::styled("●", Style::default().fg(color)),
        Span::styled(format!(" {name} ({total})"), header_style),
    ];

    if pending > 0 {
        spans.push(Span::styled(
            format!("  ○{pending}"),
            Style::default().fg(theme.pending),
        ));
    }
    if in_progress > 0 {
        spans.push(Span::styled(
            format!("  ●{in_progress}"),
            Style::default().fg(theme.in_progress),
        ));
    }
    if completed > 0 {
        spans.push(Span::styled(
            format!("  ✓{completed}"),
            Style::default().fg(theme.completed),
        ));
    }
    if selected {
        spans.push(Span::styled(
            "  (Enter: toggle)",
            Style::default().fg(theme.muted),
        ));
    }

    Line::from(spans)
}

fn task_line<'a>(app: &App, task: &Task, selected: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let prefix = if selected { " > " } else { "   " };
    let status_style = Style::default().fg(theme.status_color(task.status));

    let badge = format!("[{}]", task.status.as_str());
    let left_budget = width
        .saturating_sub(display_width(prefix) + 2 + display_width(&badge) + 2)
        .max(20);
    let head = format!("#{} {}", task.id, task.subject);
    let head = truncate_to_width(&head, left_budget);

    let subject_style = if selected {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let used = display_width(prefix) + 2 + display_width(&head);
    let padding = width.saturating_sub(used + display_width(&badge) + 1).max(1);

    Line::from(vec![
        Span::styled(prefix.to_string(), subject_style),
        Span::styled(task.status.icon().to_string(), status_style),
        Span::raw(" "),
        Span::styled(head, subject_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(badge, status_style),
    ])
}
