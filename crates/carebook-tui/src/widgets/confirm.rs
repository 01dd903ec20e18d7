//! Delete confirmation popup. `y` or `Enter` confirms; `n` or `Escape`
//! cancels.

use carebook_core::MedicalRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

use crate::theme::Theme;
use crate::widgets::centered_rect;

pub struct ConfirmDelete<'a> {
    record: &'a MedicalRecord,
    theme: &'a Theme,
}

impl<'a> ConfirmDelete<'a> {
    pub fn new(record: &'a MedicalRecord, theme: &'a Theme) -> Self {
        Self { record, theme }
    }
}

impl Widget for ConfirmDelete<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(56, 7, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" Delete record ")
            .border_style(self.theme.status_error.add_modifier(Modifier::BOLD));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::from(format!(
                "{} with {}",
                self.record.diagnosis, self.record.doctor_name
            )),
            Line::from(self.record.date.format(carebook_core::types::LONG_DATE_FORMAT).to_string()),
            Line::default(),
            Line::from("Delete this record? [y/N]").centered(),
        ];
        Paragraph::new(lines).wrap(Wrap { trim: true }).render(inner, buf);
    }
}
