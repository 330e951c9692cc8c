use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// A single-line text input with a grapheme-aware byte-offset cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    /// Cursor as a byte offset into `value`, always on a grapheme boundary
    pub cursor: usize,
    pub placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: &str) -> Self {
        TextInput {
            placeholder: placeholder.to_string(),
            ..TextInput::default()
        }
    }

    pub fn with_value(placeholder: &str, value: &str) -> Self {
        TextInput {
            value: value.to_string(),
            cursor: value.len(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// The text before and after the cursor, for rendering a cursor glyph
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }

    /// Apply a key event. Returns true when the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
                    self.value.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
                    self.value.replace_range(self.cursor..next, "");
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                if let Some(prev) = prev_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = prev;
                }
                false
            }
            KeyCode::Right => {
                if let Some(next) = next_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = next;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                false
            }
            _ => false,
        }
    }
}

/// A multi-line text area: the same buffer model with newline support and
/// vertical cursor movement.
#[derive(Debug, Clone, Default)]
pub struct TextArea {
    pub value: String,
    pub cursor: usize,
    pub placeholder: String,
}

impl TextArea {
    pub fn new(placeholder: &str) -> Self {
        TextArea {
            placeholder: placeholder.to_string(),
            ..TextArea::default()
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    /// Line index and byte column of the cursor
    fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map(|i| self.cursor - i - 1).unwrap_or(self.cursor);
        (line, col)
    }

    fn line_bounds(&self, line: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (i, text) in self.value.split('\n').enumerate() {
            let end = start + text.len();
            if i == line {
                return Some((start, end));
            }
            start = end + 1;
        }
        None
    }

    fn move_vertical(&mut self, up: bool) {
        let (line, col) = self.cursor_position();
        let target = if up {
            match line.checked_sub(1) {
                Some(l) => l,
                None => return,
            }
        } else {
            line + 1
        };
        if let Some((start, end)) = self.line_bounds(target) {
            self.cursor = (start + col).min(end);
        }
    }

    /// Apply a key event. Returns true when the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                self.value.insert(self.cursor, '\n');
                self.cursor += 1;
                true
            }
            KeyCode::Up => {
                self.move_vertical(true);
                false
            }
            KeyCode::Down => {
                self.move_vertical(false);
                false
            }
            _ => {
                // Everything else behaves exactly like the single-line input
                let mut proxy = TextInput {
                    value: std::mem::take(&mut self.value),
                    cursor: self.cursor,
                    placeholder: String::new(),
                };
                let changed = proxy.handle_key(key);
                self.value = proxy.value;
                self.cursor = proxy.cursor;
                changed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::new("");
        for c in "héllo".chars() {
            assert!(input.handle_key(press(KeyCode::Char(c))));
        }
        assert_eq!(input.value, "héllo");
        assert_eq!(input.cursor, input.value.len());

        assert!(input.handle_key(press(KeyCode::Backspace)));
        assert_eq!(input.value, "héll");
    }

    #[test]
    fn cursor_movement_respects_graphemes() {
        let mut input = TextInput::with_value("", "a你b");
        input.handle_key(press(KeyCode::Home));
        assert_eq!(input.cursor, 0);
        input.handle_key(press(KeyCode::Right));
        assert_eq!(input.cursor, 1);
        input.handle_key(press(KeyCode::Right));
        assert_eq!(input.cursor, 4); // past the 3-byte 你
        input.handle_key(press(KeyCode::Left));
        assert_eq!(input.cursor, 1);
        input.handle_key(press(KeyCode::End));
        assert_eq!(input.cursor, 5);
    }

    #[test]
    fn insert_mid_string() {
        let mut input = TextInput::with_value("", "ab");
        input.handle_key(press(KeyCode::Left));
        input.handle_key(press(KeyCode::Char('x')));
        assert_eq!(input.value, "axb");
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut input = TextInput::with_value("", "a");
        assert!(!input.handle_key(press(KeyCode::Delete)));
        input.handle_key(press(KeyCode::Home));
        assert!(input.handle_key(press(KeyCode::Delete)));
        assert_eq!(input.value, "");
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut input = TextInput::new("");
        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(chord));
        assert_eq!(input.value, "");
    }

    #[test]
    fn area_enter_inserts_newline() {
        let mut area = TextArea::new("");
        for c in "ab".chars() {
            area.handle_key(press(KeyCode::Char(c)));
        }
        area.handle_key(press(KeyCode::Enter));
        area.handle_key(press(KeyCode::Char('c')));
        assert_eq!(area.value, "ab\nc");
    }

    #[test]
    fn area_vertical_movement_clamps_column() {
        let mut area = TextArea::new("");
        area.set_value("long line\nab");
        // Cursor at end of "ab" (col 2); moving up lands at col 2 of line 0
        area.handle_key(press(KeyCode::Up));
        let (line, col) = area.cursor_position();
        assert_eq!((line, col), (0, 2));

        // End of a long line clamps into the short line below
        area.handle_key(press(KeyCode::End));
        area.handle_key(press(KeyCode::Down));
        let (line, col) = area.cursor_position();
        assert_eq!((line, col), (1, 2));
    }

    #[test]
    fn area_up_from_first_line_is_noop() {
        let mut area = TextArea::new("");
        area.set_value("abc");
        area.handle_key(press(KeyCode::Up));
        assert_eq!(area.cursor, 3);
    }
}
