use ratatui::style::Color;

use crate::io::config::UiConfig;
use crate::model::task::TaskStatus;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub muted: Color,
    pub highlight: Color,
    pub border: Color,
    pub error: Color,
    pub warning: Color,
    pub pending: Color,
    pub in_progress: Color,
    pub completed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xf9, 0xfa, 0xfb),
            text_bright: Color::Rgb(0xff, 0xff, 0xff),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            highlight: Color::Rgb(0x8b, 0x5c, 0xf6),
            border: Color::Rgb(0x4b, 0x55, 0x63),
            error: Color::Rgb(0xef, 0x44, 0x44),
            warning: Color::Rgb(0xf5, 0x9e, 0x0b),
            pending: Color::Rgb(0x6b, 0x72, 0x80),
            in_progress: Color::Rgb(0x3b, 0x82, 0xf6),
            completed: Color::Rgb(0x10, 0xb9, 0x81),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from user config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "muted" => theme.muted = color,
                    "highlight" => theme.highlight = color,
                    "border" => theme.border = color,
                    "error" => theme.error = color,
                    "warning" => theme.warning = color,
                    "pending" => theme.pending = color,
                    "in_progress" => theme.in_progress = color,
                    "completed" => theme.completed = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Get the color for a task status
    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    /// Get the display color for a group's hex string, falling back to muted
    pub fn group_color(&self, hex: &str) -> Color {
        parse_hex_color(hex).unwrap_or(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parse_hex_colors() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#8b5cf6"), Some(Color::Rgb(0x8b, 0x5c, 0xf6)));
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn config_overrides_apply() {
        let mut colors = HashMap::new();
        colors.insert("highlight".to_string(), "#010203".to_string());
        colors.insert("bogus_key".to_string(), "#010203".to_string());
        colors.insert("error".to_string(), "not-a-color".to_string());
        let ui = UiConfig { colors };

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(1, 2, 3));
        // Invalid value leaves the default in place
        assert_eq!(theme.error, Theme::default().error);
    }

    #[test]
    fn unknown_group_hex_falls_back_to_muted() {
        let theme = Theme::default();
        assert_eq!(theme.group_color("nonsense"), theme.muted);
        assert_eq!(theme.group_color("#84cc16"), Color::Rgb(0x84, 0xcc, 0x16));
    }
}
