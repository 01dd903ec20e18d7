//! Record list widget: the scrollable list of filtered records on the right.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one record |
//! | `↓` / `j` | Move cursor down one record |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `G` | Jump to the last record |
//! | `Enter` | Open the detail popup (handled by the app shell) |
//!
//! # Scroll semantics
//!
//! `cursor` is an index into the filtered view (0 = first row shown) and
//! `offset` is the first visible row. The cursor is always kept inside the
//! visible window; moving it past an edge scrolls.

use std::cell::Cell;

use carebook_core::MedicalRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecordListState {
    pub cursor: usize,
    pub offset: usize,
    pub show_dates: bool,
    pub date_format: String,
    /// Cached from the last render so `handle()` can page by screenfuls.
    last_height: Cell<usize>,
}

impl Default for RecordListState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            show_dates: true,
            date_format: carebook_core::types::LONG_DATE_FORMAT.to_string(),
            last_height: Cell::new(20),
        }
    }
}

impl RecordListState {
    pub fn new(show_dates: bool, date_format: impl Into<String>) -> Self {
        Self { show_dates, date_format: date_format.into(), ..Self::default() }
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Keep the cursor and window valid for a view of `total` rows.
    pub fn clamp(&mut self, total: usize) {
        self.cursor = self.cursor.min(total.saturating_sub(1));
        self.follow_cursor();
    }

    /// Jump back to the first row, e.g. after the filter changed.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    /// Handle a navigation event for a view of `total` rows.
    pub fn handle(&mut self, event: &AppEvent, total: usize) {
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => {
                let step = PAGE_STEP.min(self.height());
                self.cursor = self.cursor.saturating_sub(step);
            }
            AppEvent::ScrollDown => {
                let step = PAGE_STEP.min(self.height());
                self.cursor = (self.cursor + step).min(last);
            }
            AppEvent::ScrollToEnd => self.cursor = last,
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "records: cursor moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RecordList<'a> {
    records: &'a [&'a MedicalRecord],
    state: &'a RecordListState,
    focused: bool,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> RecordList<'a> {
    pub fn new(
        records: &'a [&'a MedicalRecord],
        state: &'a RecordListState,
        focused: bool,
        title: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self { records, state, focused, title, theme }
    }
}

impl Widget for RecordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title(self.title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let total = self.records.len();
        if total == 0 {
            Paragraph::new(Line::from(Span::styled(
                "No records match the current filters.",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.records[start..end]
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let line = render_record(record, self.state, self.theme);
                if self.focused && start + row == self.state.cursor {
                    line.patch_style(self.theme.list_cursor)
                } else {
                    line
                }
            })
            .collect();

        // Text (fill) + 1-column scrollbar strip inside the borders.
        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn render_record(record: &MedicalRecord, state: &RecordListState, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    if state.show_dates {
        spans.push(Span::styled(
            format!("{:<19}", record.date.format(&state.date_format).to_string()),
            theme.list_date,
        ));
    }

    spans.push(Span::styled(
        format!("{:<13}", record.category.name()),
        theme.category_style(record.category),
    ));
    spans.push(Span::styled("│ ".to_string(), Style::default().add_modifier(Modifier::DIM)));
    spans.push(Span::styled(
        record.diagnosis.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        record.doctor_name.clone(),
        theme.doctor_style(&record.doctor_name),
    ));
    if !record.hospital.is_empty() {
        spans.push(Span::styled(
            format!(" · {}", record.hospital),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
