//! Status bar widget: the 1-line strip at the top of the screen.
//!
//! Shows the record counts, the sort order, the active facets and date
//! bounds, and the last notice (export result, validation error). Keybinding
//! hints are right-aligned in the same row.

use carebook_core::{RecordFilter, types::ISO_DATE_FORMAT};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::Theme;

/// A one-line message shown until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct StatusBar<'a> {
    filter: &'a RecordFilter,
    shown: usize,
    total: usize,
    notice: Option<&'a Notice>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        filter: &'a RecordFilter,
        shown: usize,
        total: usize,
        notice: Option<&'a Notice>,
        theme: &'a Theme,
    ) -> Self {
        Self { filter, shown, total, notice, theme }
    }
}

/// Short description of the active facets and date bounds, e.g.
/// `doctor=Emily Carter  from=2024-01-01`.
pub fn describe_facets(filter: &RecordFilter) -> String {
    let mut parts = Vec::new();
    if let Some(ref d) = filter.doctor {
        parts.push(format!("doctor={d}"));
    }
    if let Some(ref h) = filter.hospital {
        parts.push(format!("hospital={h}"));
    }
    if let Some(c) = filter.category {
        parts.push(format!("category={c}"));
    }
    if let Some(from) = filter.from {
        parts.push(format!("from={}", from.format(ISO_DATE_FORMAT)));
    }
    if let Some(to) = filter.to {
        parts.push(format!("to={}", to.format(ISO_DATE_FORMAT)));
    }
    parts.join("  ")
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.status_bar);

        let mut spans = vec![
            Span::styled(" carebook ", self.theme.status_bar.add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" {}/{} records  {} ", self.shown, self.total, self.filter.order.label()),
                self.theme.status_bar,
            ),
        ];

        let facets = describe_facets(self.filter);
        if !facets.is_empty() {
            spans.push(Span::styled(format!(" {facets} "), self.theme.status_bar));
        }

        match self.notice {
            Some(Notice::Info(msg)) => {
                spans.push(Span::styled(format!(" {msg} "), self.theme.status_notice))
            }
            Some(Notice::Error(msg)) => {
                spans.push(Span::styled(format!(" {msg} "), self.theme.status_error))
            }
            None => {}
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hint = " :cmd  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.status_bar.add_modifier(Modifier::DIM));
    }
}
