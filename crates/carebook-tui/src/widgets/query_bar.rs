//! Query bar widget: the live fuzzy search input at the bottom of the screen.
//!
//! Every edit re-runs the record filter; the right edge shows how many
//! records the current filter keeps.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub input: TextInput,
}

impl QueryBarState {
    /// The search text typed by the user.
    pub fn query(&self) -> &str {
        self.input.as_str()
    }

    /// Handle a key event. Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let changed = self.input.handle(event);
        if changed {
            tracing::debug!(query = %self.input.as_str(), "query: edited");
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    /// `(shown, total)` record counts.
    counts: (usize, usize),
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        state: &'a QueryBarState,
        focused: bool,
        counts: (usize, usize),
        theme: &'a Theme,
    ) -> Self {
        Self { state, focused, counts, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let x = (area.x + 1 + self.state.input.cursor_chars()).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Search").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(20)])
            .split(inner);

        let query_line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search diagnosis, doctor, hospital",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.input.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let (shown, total) = self.counts;
        Paragraph::new(Line::from(format!("{shown}/{total} records")).right_aligned())
            .render(chunks[1], buf);
    }
}
