use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::group::UNCATEGORIZED;
use crate::ops::task_ops::link_labels;
use crate::tui::app::App;
use crate::util::unicode::word_wrap;

/// Render the task detail screen
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let Some(session) = &app.session else {
        return;
    };
    let Some(task) = app.detail_task.as_deref().and_then(|id| session.tasks.get_task(id))
    else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            " Task no longer exists.",
            Style::default().fg(theme.muted),
        )))
        .style(Style::default().bg(theme.background));
        frame.render_widget(paragraph, area);
        return;
    };

    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.text);
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();

    if app.confirm_delete {
        lines.push(super::helpers::confirm_line(
            &theme,
            format!(" Delete task #{} \"{}\"?", task.id, task.subject),
        ));
        lines.push(Line::default());
    }

    lines.push(Line::from(vec![
        Span::styled(format!(" Task #{}", task.id), Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD)),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(" Subject:   ", label),
        Span::styled(task.subject.clone(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Status:    ", label),
        super::helpers::status_badge(&theme, task.status),
        Span::styled("  (s: cycle)", label),
    ]));

    let group = task.group().unwrap_or(UNCATEGORIZED);
    let group_color = theme.group_color(session.groups.group_color(group));
    lines.push(Line::from(vec![
        Span::styled(" Group:     ", label),
        Span::styled("● ", Style::default().fg(group_color)),
        Span::styled(group.to_string(), value),
    ]));

    if !task.owner.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(" Owner:     ", label),
            Span::styled(task.owner.clone(), value),
        ]));
    }
    if let Some(active_form) = &task.active_form {
        lines.push(Line::from(vec![
            Span::styled(" Active:    ", label),
            Span::styled(active_form.clone(), value),
        ]));
    }

    // Description
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(" Description:", label)));
    if task.description.is_empty() {
        lines.push(Line::from(Span::styled(" (no description)", label)));
    } else {
        for wrapped in word_wrap(&task.description, width.saturating_sub(4).max(20)) {
            lines.push(Line::from(Span::styled(format!("  {wrapped}"), value)));
        }
    }

    // Dependencies
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(" Dependencies:", label)));
    let blocks = if task.blocks.is_empty() {
        "(none)".to_string()
    } else {
        link_labels(&session.tasks, &task.blocks).join(", ")
    };
    let blocked_by = if task.blocked_by.is_empty() {
        "(none)".to_string()
    } else {
        link_labels(&session.tasks, &task.blocked_by).join(", ")
    };
    lines.push(Line::from(vec![
        Span::styled("   blocks:     ", label),
        Span::styled(blocks, value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("   blocked by: ", label),
        Span::styled(blocked_by, value),
    ]));

    // Clamp scroll to the body length
    let height = area.height as usize;
    let max_scroll = lines.len().saturating_sub(height);
    if app.detail_scroll > max_scroll {
        app.detail_scroll = max_scroll;
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .scroll((app.detail_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
