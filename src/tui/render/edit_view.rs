use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::form::{EditField, Picker};
use crate::tui::textinput::TextInput;
use crate::tui::theme::Theme;

/// Render the task create/edit screen
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(form) = &app.edit else {
        return;
    };

    if let Some(picker) = &form.picker {
        render_picker(frame, theme, picker, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let title = match &form.task_id {
        Some(id) => format!(" Edit Task #{id}"),
        None => " New Task".to_string(),
    };
    lines.push(Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    push_input_field(
        &mut lines,
        theme,
        "Subject",
        &form.subject,
        form.focus == EditField::Subject,
    );

    // Description: multi-line, cursor shown on its line
    lines.push(field_label(theme, "Description", form.focus == EditField::Description));
    let (before, after) = form.description.value.split_at(form.description.cursor);
    let mut desc_lines: Vec<String> = Vec::new();
    let cursor_marker = if form.focus == EditField::Description {
        "\u{258C}"
    } else {
        ""
    };
    let combined = format!("{before}{cursor_marker}{after}");
    if combined.is_empty() {
        desc_lines.push(format!("  {}", form.description.placeholder));
    } else {
        desc_lines.extend(combined.lines().map(|l| format!("  {l}")));
    }
    let desc_style = if combined.is_empty() {
        Style::default().fg(theme.muted)
    } else {
        Style::default().fg(theme.text)
    };
    for dl in desc_lines {
        lines.push(Line::from(Span::styled(dl, desc_style)));
    }
    lines.push(Line::default());

    // Status selector
    let focused = form.focus == EditField::Status;
    let status = form.selected_status();
    let status_text = if focused {
        format!("[{} {}] ↑↓", status.icon(), status.as_str())
    } else {
        format!(" {} {}", status.icon(), status.as_str())
    };
    lines.push(field_label(theme, "Status", focused));
    lines.push(Line::from(Span::styled(
        format!("  {status_text}"),
        Style::default().fg(theme.status_color(status)),
    )));
    lines.push(Line::default());

    // Group selector
    let focused = form.focus == EditField::Group;
    let group_text = form
        .group_options
        .get(form.group_idx)
        .cloned()
        .unwrap_or_else(|| "(none)".to_string());
    let group_text = if focused {
        format!("[{group_text}] ↑↓")
    } else {
        format!(" {group_text}")
    };
    lines.push(field_label(theme, "Group", focused));
    lines.push(Line::from(Span::styled(
        format!("  {group_text}"),
        Style::default().fg(theme.text),
    )));
    lines.push(Line::default());

    push_input_field(&mut lines, theme, "Owner", &form.owner, form.focus == EditField::Owner);
    push_input_field_with_note(
        &mut lines,
        theme,
        "Blocks",
        "(tasks that wait for this; / to pick)",
        &form.blocks,
        form.focus == EditField::Blocks,
    );
    push_input_field_with_note(
        &mut lines,
        theme,
        "Blocked By",
        "(tasks this waits for; / to pick)",
        &form.blocked_by,
        form.focus == EditField::BlockedBy,
    );

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}

fn field_label<'a>(theme: &Theme, name: &str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    Line::from(Span::styled(format!(" {name}:"), style))
}

/// Single-line input with a visible cursor when focused
fn input_line<'a>(theme: &Theme, input: &TextInput, focused: bool) -> Line<'a> {
    if input.value.is_empty() && !focused {
        return Line::from(Span::styled(
            format!("  {}", input.placeholder),
            Style::default().fg(theme.muted),
        ));
    }
    let (before, after) = input.split_at_cursor();
    let mut spans = vec![
        Span::styled("  ".to_string(), Style::default()),
        Span::styled(before.to_string(), Style::default().fg(theme.text)),
    ];
    if focused {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight),
        ));
    }
    spans.push(Span::styled(after.to_string(), Style::default().fg(theme.text)));
    Line::from(spans)
}

fn push_input_field(
    lines: &mut Vec<Line<'_>>,
    theme: &Theme,
    name: &str,
    input: &TextInput,
    focused: bool,
) {
    lines.push(field_label(theme, name, focused));
    lines.push(input_line(theme, input, focused));
    lines.push(Line::default());
}

fn push_input_field_with_note(
    lines: &mut Vec<Line<'_>>,
    theme: &Theme,
    name: &str,
    note: &str,
    input: &TextInput,
    focused: bool,
) {
    let mut label = field_label(theme, name, focused);
    label
        .spans
        .push(Span::styled(format!(" {note}"), Style::default().fg(theme.muted)));
    lines.push(label);
    lines.push(input_line(theme, input, focused));
    lines.push(Line::default());
}

fn render_picker(frame: &mut Frame, theme: &Theme, picker: &Picker, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let field_name = match picker.field {
        EditField::BlockedBy => "Blocked By",
        _ => "Blocks",
    };
    lines.push(Line::from(Span::styled(
        format!(" Select tasks for {field_name}"),
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(field_label(theme, "Search", true));
    lines.push(input_line(theme, &picker.search, true));
    lines.push(Line::default());

    if picker.matches.is_empty() {
        lines.push(Line::from(Span::styled(
            " No tasks found.",
            Style::default().fg(theme.muted),
        )));
    }

    // Window the match list around the cursor
    let window = (area.height as usize).saturating_sub(lines.len() + 2).max(1);
    let start = picker.cursor.saturating_sub(window.saturating_sub(1));
    let end = (start + window).min(picker.matches.len());

    for (i, (id, status, subject)) in picker.matches[start..end].iter().enumerate() {
        let selected = start + i == picker.cursor;
        let prefix = if selected { " > " } else { "   " };
        let checkbox = if picker.is_selected(id) { "[✓]" } else { "[ ]" };
        let style = if selected {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{prefix}{checkbox} "), style),
            Span::styled(
                status.icon().to_string(),
                Style::default().fg(theme.status_color(*status)),
            ),
            Span::styled(format!(" #{id} {subject}"), style),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " [Enter] toggle  [Tab] confirm  [Esc] cancel",
        Style::default().fg(theme.muted),
    )));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
