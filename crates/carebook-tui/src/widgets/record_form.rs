//! Add / edit form: a popup with one text input per record field and a
//! category selector.
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `Tab` / `↓` | Next field |
//! | `Shift+Tab` / `↑` | Previous field |
//! | `←` / `→` | Move the text cursor, or cycle the category |
//! | `Enter` | Save (validated by the app shell) |
//! | `Escape` | Cancel |

use carebook_core::{Category, MedicalRecord, RecordDraft, RecordId};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::{centered_rect, text_input::TextInput};

/// Text fields in display order; the category selector follows them.
const TEXT_FIELDS: [&str; 6] = ["Doctor", "Hospital", "Diagnosis", "Symptoms", "Treatment", "Notes"];
const CATEGORY_FIELD: usize = TEXT_FIELDS.len();
const FIELD_COUNT: usize = TEXT_FIELDS.len() + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(RecordId),
}

#[derive(Debug, Clone)]
pub struct RecordFormState {
    pub mode: FormMode,
    pub fields: [TextInput; 6],
    pub category: Category,
    /// Index of the focused field; `CATEGORY_FIELD` is the selector.
    pub focused: usize,
    /// Validation error from the last save attempt.
    pub error: Option<String>,
}

impl RecordFormState {
    pub fn add() -> Self {
        Self::from_draft(FormMode::Add, RecordDraft::new())
    }

    pub fn edit(record: &MedicalRecord) -> Self {
        Self::from_draft(FormMode::Edit(record.id.clone()), RecordDraft::from_record(record))
    }

    fn from_draft(mode: FormMode, draft: RecordDraft) -> Self {
        Self {
            mode,
            fields: [
                TextInput::with_text(draft.doctor_name),
                TextInput::with_text(draft.hospital),
                TextInput::with_text(draft.diagnosis),
                TextInput::with_text(draft.symptoms),
                TextInput::with_text(draft.treatment),
                TextInput::with_text(draft.notes),
            ],
            category: draft.category,
            focused: 0,
            error: None,
        }
    }

    /// The form contents as a draft, ready for validation.
    pub fn draft(&self) -> RecordDraft {
        let [doctor, hospital, diagnosis, symptoms, treatment, notes] = &self.fields;
        RecordDraft {
            doctor_name: doctor.as_str().to_string(),
            hospital: hospital.as_str().to_string(),
            diagnosis: diagnosis.as_str().to_string(),
            symptoms: symptoms.as_str().to_string(),
            treatment: treatment.as_str().to_string(),
            notes: notes.as_str().to_string(),
            category: self.category,
        }
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Add => " New record ".to_string(),
            FormMode::Edit(ref id) => format!(" Edit {id} "),
        }
    }

    /// Handle an editing key. `Enter` and `Escape` belong to the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        match event {
            AppEvent::FocusNext | AppEvent::Nav(Direction::Down) => {
                self.focused = (self.focused + 1) % FIELD_COUNT;
            }
            AppEvent::FocusPrev | AppEvent::Nav(Direction::Up) => {
                self.focused = (self.focused + FIELD_COUNT - 1) % FIELD_COUNT;
            }
            AppEvent::Nav(Direction::Right) if self.focused == CATEGORY_FIELD => {
                self.category = self.category.next();
            }
            AppEvent::Nav(Direction::Left) if self.focused == CATEGORY_FIELD => {
                self.category = self.category.prev();
            }
            other => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.handle(other);
                }
            }
        }
    }

    /// Absolute terminal position of the text cursor, if a text field is
    /// focused. Matches the layout used by [`RecordForm`].
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let field = self.fields.get(self.focused)?;
        let inner = form_inner(area);
        let x = (inner.x + LABEL_WIDTH + field.cursor_chars()).min(inner.right().saturating_sub(1));
        Some((x, inner.y + self.focused as u16))
    }
}

const LABEL_WIDTH: u16 = 12;

fn form_popup(area: Rect) -> Rect {
    centered_rect(76, FIELD_COUNT as u16 + 5, area)
}

fn form_inner(area: Rect) -> Rect {
    Block::bordered().inner(form_popup(area))
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RecordForm<'a> {
    state: &'a RecordFormState,
    theme: &'a Theme,
}

impl<'a> RecordForm<'a> {
    pub fn new(state: &'a RecordFormState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for RecordForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = form_popup(area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(self.state.title())
            .title_bottom(" Tab: next field  ←/→: category  Enter: save  Esc: cancel ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let label = |idx: usize, text: &'static str| {
            let style = if idx == self.state.focused {
                self.theme.list_label.add_modifier(Modifier::REVERSED)
            } else {
                self.theme.list_label
            };
            Span::styled(format!("{text:<11} "), style)
        };

        let mut lines: Vec<Line> = TEXT_FIELDS
            .iter()
            .zip(&self.state.fields)
            .enumerate()
            .map(|(idx, (name, input))| Line::from(vec![label(idx, *name), Span::raw(input.as_str())]))
            .collect();

        lines.push(Line::from(vec![
            label(CATEGORY_FIELD, "Category"),
            Span::raw("◀ "),
            Span::styled(self.state.category.name(), self.theme.category_style(self.state.category)),
            Span::raw(" ▶"),
        ]));

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Doctor, diagnosis and treatment are required. Separate symptoms with commas.",
            self.theme.list_date,
        )));
        if let Some(ref err) = self.state.error {
            lines.push(Line::from(Span::styled(err.as_str(), self.theme.status_error)));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebook_core::dataset::demo_records;

    fn type_str(form: &mut RecordFormState, s: &str) {
        for c in s.chars() {
            form.handle(&AppEvent::Char(c));
        }
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut form = RecordFormState::add();
        type_str(&mut form, "Ada Park");
        form.handle(&AppEvent::FocusNext);
        form.handle(&AppEvent::FocusNext);
        type_str(&mut form, "Migraine");
        form.handle(&AppEvent::FocusNext);
        type_str(&mut form, "headache, nausea");

        let draft = form.draft();
        assert_eq!(draft.doctor_name, "Ada Park");
        assert_eq!(draft.diagnosis, "Migraine");
        assert_eq!(draft.symptom_list(), ["headache", "nausea"]);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn category_cycles_only_on_selector() {
        let mut form = RecordFormState::add();
        form.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(form.category, Category::Consultation);

        form.handle(&AppEvent::FocusPrev);
        assert_eq!(form.focused, CATEGORY_FIELD);
        form.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(form.category, Category::Procedure);
        form.handle(&AppEvent::Nav(Direction::Left));
        form.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(form.category, Category::FollowUp);
        assert_eq!(form.cursor_position(Rect::new(0, 0, 100, 40)), None);
    }

    #[test]
    fn edit_prefills_from_record() {
        let record = &demo_records()[2];
        let form = RecordFormState::edit(record);
        assert_eq!(form.mode, FormMode::Edit(record.id.clone()));
        assert_eq!(form.title(), " Edit rec3 ");
        assert_eq!(form.draft(), RecordDraft::from_record(record));
    }
}
