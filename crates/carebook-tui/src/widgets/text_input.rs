//! Single-line text buffer with a cursor, shared by the query bar, the
//! command bar, and the record form fields.

use crate::event::{AppEvent, Direction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    /// Byte offset of the cursor within `text`, always on a char boundary.
    cursor: usize,
}

impl TextInput {
    /// A buffer holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing event. Returns `true` when the text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.next_boundary();
                false
            }
            _ => false,
        }
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_chars(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut input = TextInput::default();
        for c in s.chars() {
            input.handle(&AppEvent::Char(c));
        }
        input
    }

    #[test]
    fn insert_and_backspace() {
        let mut input = typed("emly");
        assert_eq!(input.as_str(), "emly");
        assert_eq!(input.cursor_chars(), 4);
        assert!(input.handle(&AppEvent::Backspace));
        assert_eq!(input.as_str(), "eml");
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut input = typed("José");
        input.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(input.cursor_chars(), 3);
        input.handle(&AppEvent::Char('e'));
        assert_eq!(input.as_str(), "Joseé");
        input.handle(&AppEvent::Nav(Direction::Right));
        input.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(input.cursor_chars(), 5);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::with_text("ab");
        input.handle(&AppEvent::Nav(Direction::Left));
        input.handle(&AppEvent::Nav(Direction::Left));
        input.handle(&AppEvent::Nav(Direction::Left));
        assert!(!input.handle(&AppEvent::Backspace));
        assert_eq!(input.as_str(), "ab");
    }
}
