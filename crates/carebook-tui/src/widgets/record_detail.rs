//! Detail popup: every field of one record in a centred overlay.
//!
//! Opened with `Enter` on the record list; closed with `Enter`, `Escape`, or
//! `q`. The symptoms section is omitted when the record has none.

use carebook_core::MedicalRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

use crate::theme::Theme;
use crate::widgets::centered_rect;

pub struct RecordDetail<'a> {
    record: &'a MedicalRecord,
    date_format: &'a str,
    theme: &'a Theme,
}

impl<'a> RecordDetail<'a> {
    pub fn new(record: &'a MedicalRecord, date_format: &'a str, theme: &'a Theme) -> Self {
        Self { record, date_format, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let r = self.record;
        let label = |text: &'static str| Span::styled(format!("{text:<11}"), self.theme.list_label);

        let mut lines = vec![
            Line::from(vec![
                label("Date"),
                Span::raw(r.date.format(self.date_format).to_string()),
            ]),
            Line::from(vec![
                label("Category"),
                Span::styled(r.category.name(), self.theme.category_style(r.category)),
            ]),
            Line::from(vec![
                label("Doctor"),
                Span::styled(r.doctor_name.as_str(), self.theme.doctor_style(&r.doctor_name)),
            ]),
        ];
        if !r.hospital.is_empty() {
            lines.push(Line::from(vec![label("Hospital"), Span::raw(r.hospital.as_str())]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![label("Diagnosis"), Span::raw(r.diagnosis.as_str())]));

        if r.has_symptoms() {
            lines.push(Line::default());
            lines.push(Line::from(label("Symptoms")));
            lines.extend(r.symptoms.iter().map(|s| Line::from(format!("  • {s}"))));
        }

        lines.push(Line::default());
        lines.push(Line::from(label("Treatment")));
        lines.push(Line::from(r.treatment.as_str()));

        if !r.notes.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(label("Notes")));
            lines.push(Line::from(r.notes.as_str()));
        }
        lines
    }
}

impl Widget for RecordDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 24, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.record.diagnosis))
            .title_bottom(" Enter/Esc to close ")
            .border_style(self.theme.border_focused.add_modifier(Modifier::BOLD));
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(self.lines())
            .style(Style::default())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
