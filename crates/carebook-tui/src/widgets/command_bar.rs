//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` from the filter pane or the record list. Shows a
//! `:` prefix followed by the typed command. The app shell parses the input
//! with [`crate::commands::Command::parse`] on `Enter`; `Escape` cancels.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandBarState {
    pub input: TextInput,
    /// Error from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    /// Handle an editing key while the bar is open.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.input.handle(event);
    }

    /// Absolute terminal column of the text cursor within `area`. The `:`
    /// glyph occupies the first column.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.cursor_chars()).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = match self.state.error {
            Some(ref err) => Line::from(Span::styled(format!("E  {err}"), self.theme.status_error)),
            None => Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::styled(self.state.input.as_str(), Style::default()),
            ]),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_cleared_on_next_key() {
        let mut s = CommandBarState::default();
        s.error = Some("unknown command: frob".to_string());
        s.handle(&AppEvent::Char('q'));
        assert!(s.error.is_none());
        assert_eq!(s.input.as_str(), "q");
    }

    #[test]
    fn renders_prompt_and_error() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 30, 1);
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Char('q'));

        let mut buf = Buffer::empty(area);
        CommandBar::new(&s, &theme).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), ":");
        assert_eq!(buf[(1, 0)].symbol(), "q");
        assert_eq!(s.cursor_col(area), 2);

        s.error = Some("bad".into());
        let mut buf = Buffer::empty(area);
        CommandBar::new(&s, &theme).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "E");
    }
}
