use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the project picker
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        " Projects",
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    if app.projects.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" No projects found under {}", app.paths.tasks_root.display()),
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            " A project is any directory there containing <id>.json task files.",
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            " Create one with: td add <project> \"First task\"",
            Style::default().fg(theme.muted),
        )));
    }

    for (i, project) in app.projects.iter().enumerate() {
        let selected = i == app.projects_cursor;
        let prefix = if selected { " > " } else { "   " };
        let name_style = if selected {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(prefix.to_string(), name_style),
            Span::styled(project.name.clone(), name_style),
            Span::styled(
                format!(" [{}]", project.task_count),
                Style::default().fg(theme.muted),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
