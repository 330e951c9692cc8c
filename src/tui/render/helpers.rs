use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::TaskStatus;
use crate::tui::app::{App, Screen};
use crate::tui::theme::Theme;

/// Render the two-row title bar: app context plus a separator line
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = match (&app.screen, &app.session) {
        (Screen::Projects, _) => format!(" taskdeck v{}", env!("CARGO_PKG_VERSION")),
        (_, Some(session)) => format!(" taskdeck: {}", session.project),
        _ => " taskdeck".to_string(),
    };

    let title_line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
    ));
    let separator = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(app.theme.border),
    ));

    let paragraph = Paragraph::new(vec![title_line, separator])
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// One key hint, greyed out when not applicable
pub struct KeyHint {
    pub key: &'static str,
    pub desc: &'static str,
    pub enabled: bool,
}

impl KeyHint {
    pub fn new(key: &'static str, desc: &'static str) -> Self {
        KeyHint {
            key,
            desc,
            enabled: true,
        }
    }

    pub fn when(key: &'static str, desc: &'static str, enabled: bool) -> Self {
        KeyHint { key, desc, enabled }
    }
}

/// Build a hint line: `[key] desc  [key] desc …`
pub fn hint_line<'a>(theme: &Theme, hints: &[KeyHint]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let (key_style, desc_style) = if hint.enabled {
            (
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(theme.muted),
            )
        } else {
            let disabled = Style::default().fg(theme.border);
            (disabled, disabled)
        };
        spans.push(Span::styled(format!("[{}]", hint.key), key_style));
        spans.push(Span::styled(format!(" {}", hint.desc), desc_style));
    }
    Line::from(spans)
}

/// Render the bottom status row: an error/notice wins, then the live
/// search prompt, then the screen's key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        ))
    } else if app.search_active {
        Line::from(vec![
            Span::styled(
                format!(" /{}", app.search_input.value),
                Style::default().fg(app.theme.text_bright),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight)),
            Span::styled(
                "  Enter confirm  Esc done",
                Style::default().fg(app.theme.muted),
            ),
        ])
    } else {
        status_hints(app)
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn status_hints(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let hints: Vec<KeyHint> = match app.screen {
        Screen::Projects => vec![
            KeyHint::when("↑↓", "navigate", !app.projects.is_empty()),
            KeyHint::when("Enter", "open", !app.projects.is_empty()),
            KeyHint::new("r", "refresh"),
            KeyHint::new("q", "quit"),
        ],
        Screen::Tasks => {
            let task_selected = app.selected_task_id().is_some();
            vec![
                KeyHint::when("↑↓", "navigate", !app.rows.is_empty()),
                KeyHint::when("Enter", "select", !app.rows.is_empty()),
                KeyHint::new("n", "new"),
                KeyHint::when("e", "edit", task_selected),
                KeyHint::when("s", "status", task_selected),
                KeyHint::new("f/g/h", "filter"),
                KeyHint::new("/", "search"),
                KeyHint::new("G", "groups"),
                KeyHint::new("Esc", "back"),
            ]
        }
        Screen::Detail => vec![
            KeyHint::new("j/k", "next/prev"),
            KeyHint::new("e", "edit"),
            KeyHint::new("s", "status"),
            KeyHint::new("d", "delete"),
            KeyHint::new("Esc", "back"),
        ],
        Screen::Edit => vec![
            KeyHint::new("Tab", "next field"),
            KeyHint::new("Ctrl+S", "save"),
            KeyHint::new("Esc", "cancel"),
        ],
        Screen::Groups => vec![
            KeyHint::new("Enter", "edit"),
            KeyHint::new("n", "new"),
            KeyHint::new("d", "delete"),
            KeyHint::new("K/J", "reorder"),
            KeyHint::new("Esc", "back"),
        ],
        Screen::GroupEdit => vec![
            KeyHint::new("Tab", "field"),
            KeyHint::new("←→", "color"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ],
    };
    let mut line = hint_line(theme, &hints);
    line.spans.insert(0, Span::raw(" "));
    line
}

/// Status badge spans: icon + name in the status color
pub fn status_badge<'a>(theme: &Theme, status: TaskStatus) -> Span<'a> {
    Span::styled(
        format!("{} {}", status.icon(), status.as_str()),
        Style::default().fg(theme.status_color(status)),
    )
}

/// A confirmation prompt line used by the delete dialogs
pub fn confirm_line<'a>(theme: &Theme, message: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            message,
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [y] confirm  [n] cancel", Style::default().fg(theme.muted)),
    ])
}
