use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::group::DEFAULT_COLORS;
use crate::tui::app::App;

/// Render the group management screen
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(session) = &app.session else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        " Groups",
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    if app.groups_confirm_delete
        && let Some(group) = session.groups.groups.get(app.groups_cursor)
    {
        lines.push(super::helpers::confirm_line(
            theme,
            format!(" Delete group \"{}\"?", group.name),
        ));
        lines.push(Line::default());
    }

    if session.groups.groups.is_empty() {
        lines.push(Line::from(Span::styled(
            " No groups defined.",
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            " Press 'n' to create a group.",
            Style::default().fg(theme.muted),
        )));
    }

    let count = session.groups.groups.len();
    for (i, group) in session.groups.groups.iter().enumerate() {
        let selected = i == app.groups_cursor;
        let prefix = if selected { " > " } else { "   " };
        let style = if selected {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans = vec![
            Span::styled(prefix.to_string(), style),
            Span::styled("██", Style::default().fg(theme.group_color(&group.color))),
            Span::styled(format!(" {}", group.name), style),
        ];
        if selected {
            let mut hint = String::new();
            if i > 0 {
                hint.push_str(" [K↑]");
            }
            if i + 1 < count {
                hint.push_str(" [J↓]");
            }
            spans.push(Span::styled(hint, Style::default().fg(theme.muted)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "   [+ n: add group]",
        Style::default().fg(theme.muted),
    )));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}

/// Render the group create/edit screen
pub fn render_edit(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(form) = &app.group_edit else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let title = if form.original.is_some() {
        " Edit Group"
    } else {
        " New Group"
    };
    lines.push(Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    // Name field
    let name_label_style = if form.focus == 0 {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    lines.push(Line::from(Span::styled(" Name:", name_label_style)));
    let (before, after) = form.name.split_at_cursor();
    let mut name_spans = vec![Span::raw("  ".to_string())];
    if form.name.value.is_empty() && form.focus != 0 {
        name_spans.push(Span::styled(
            form.name.placeholder.clone(),
            Style::default().fg(theme.muted),
        ));
    } else {
        name_spans.push(Span::styled(
            before.to_string(),
            Style::default().fg(theme.text),
        ));
        if form.focus == 0 {
            name_spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(theme.highlight),
            ));
        }
        name_spans.push(Span::styled(
            after.to_string(),
            Style::default().fg(theme.text),
        ));
    }
    lines.push(Line::from(name_spans));
    lines.push(Line::default());

    // Color selector
    let color_label_style = if form.focus == 1 {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    let current = form.selected_color();
    lines.push(Line::from(vec![
        Span::styled(" Color: ", color_label_style),
        Span::styled("████", Style::default().fg(theme.group_color(current))),
        Span::styled(format!(" {current}"), Style::default().fg(theme.text)),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Presets:",
        Style::default().fg(theme.muted),
    )));

    let mut palette_spans = vec![Span::raw(" ".to_string())];
    for (i, color) in DEFAULT_COLORS.iter().enumerate() {
        let swatch = Span::styled("██", Style::default().fg(theme.group_color(color)));
        if i == form.color_idx && form.focus == 1 {
            palette_spans.push(Span::styled("[", Style::default().fg(theme.highlight)));
            palette_spans.push(swatch);
            palette_spans.push(Span::styled("]", Style::default().fg(theme.highlight)));
        } else {
            palette_spans.push(Span::raw(" ".to_string()));
            palette_spans.push(swatch);
            palette_spans.push(Span::raw(" ".to_string()));
        }
    }
    lines.push(Line::from(palette_spans));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
