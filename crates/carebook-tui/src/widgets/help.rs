//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`. Action keys are shown as
//! configured, not as their defaults.

use carebook_core::config::Keymap;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::widgets::centered_rect;

pub struct HelpPopup<'a> {
    keys: &'a Keymap,
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(keys: &'a Keymap, theme: &'a Theme) -> Self {
        Self { keys, theme }
    }

    fn bindings(&self) -> Vec<(String, &'static str)> {
        let k = self.keys;
        vec![
            ("q  /  Ctrl+c".into(), "Quit"),
            ("Tab".into(), "Cycle focus: filters → records → search"),
            (k.query_focus.to_string(), "Focus search bar"),
            ("Escape".into(), "Leave search bar / close popup"),
            ("↑ k  /  ↓ j".into(), "Move cursor"),
            ("← h  /  → l".into(), "Collapse / expand filter group"),
            ("Enter / Space".into(), "Toggle filter value"),
            ("Enter".into(), "Open record details"),
            ("PageUp / PageDown".into(), "Page through records"),
            (k.scroll_to_end.to_string(), "Jump to last record"),
            (k.toggle_sort.to_string(), "Toggle newest / oldest first"),
            (k.clear_filters.to_string(), "Clear filters and date range"),
            (k.add_record.to_string(), "Add a record"),
            (k.edit_record.to_string(), "Edit selected record"),
            (k.delete_record.to_string(), "Delete selected record"),
            (k.export.to_string(), "Export filtered records to JSON"),
            (":".into(), "Command line (:help for commands)"),
            ("?".into(), "Toggle this help popup"),
        ]
    }
}

const COMMANDS: &[(&str, &str)] = &[
    (":q", "Quit"),
    (":theme <default|gruvbox>", "Switch colour theme"),
    (":dates", "Toggle the date column"),
    (":sort <newest|oldest>", "Set sort order"),
    (":from <date|->  :to <date|->", "Set or clear a date bound"),
    (":clear", "Clear filters and date range"),
    (":export [path]", "Export filtered records"),
];

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(80, 30, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" carebook: keybindings (? to close) ")
            .border_style(self.theme.border_focused.add_modifier(Modifier::BOLD));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let row = |key: String, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<30}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(desc),
            ])
        };

        let mut lines: Vec<Line> = self
            .bindings()
            .into_iter()
            .map(|(key, desc)| row(key, desc))
            .collect();
        lines.push(Line::default());
        lines.extend(COMMANDS.iter().map(|(cmd, desc)| row(cmd.to_string(), *desc)));

        Paragraph::new(lines).render(inner, buf);
    }
}
