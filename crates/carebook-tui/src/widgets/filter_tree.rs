//! Filter tree widget: collapsible facet groups in the left pane.
//!
//! Three groups (Doctors, Hospitals, Categories) list the distinct values in
//! the store. At most one value per group is selected; the selection becomes
//! an exact-match facet on the record filter.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor over the visible rows.
//! - `→`/`l` expands the focused group; `←`/`h` collapses it (from a value
//!   row, the enclosing group).
//! - `Enter` or `Space` on a value selects it, or clears it if it was
//!   already selected. `Enter` on a group header toggles expansion.

use carebook_core::{Category, RecordFilter, RecordStore};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Doctor,
    Hospital,
    Category,
}

impl FacetKind {
    pub fn title(self) -> &'static str {
        match self {
            FacetKind::Doctor => "Doctors",
            FacetKind::Hospital => "Hospitals",
            FacetKind::Category => "Categories",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FacetGroup {
    pub kind: FacetKind,
    pub expanded: bool,
    pub values: Vec<String>,
    /// Index into `values`.
    pub selected: Option<usize>,
}

impl FacetGroup {
    fn new(kind: FacetKind, values: Vec<String>) -> Self {
        Self { kind, expanded: true, values, selected: None }
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.and_then(|i| self.values.get(i)).map(String::as_str)
    }

    fn toggle(&mut self, idx: usize) {
        self.selected = if self.selected == Some(idx) { None } else { Some(idx) };
    }
}

/// One visible line of the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Group(usize),
    Value(usize, usize),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterTreeState {
    pub groups: Vec<FacetGroup>,
    /// Index into the visible (flattened) rows.
    pub cursor: usize,
}

impl FilterTreeState {
    pub fn from_store(store: &RecordStore) -> Self {
        let mut state = Self::default();
        state.rebuild(store);
        state
    }

    /// Re-derive the facet values from `store`, keeping selections and
    /// expansion for values that still exist.
    pub fn rebuild(&mut self, store: &RecordStore) {
        let fresh = [
            FacetGroup::new(FacetKind::Doctor, store.doctors()),
            FacetGroup::new(FacetKind::Hospital, store.hospitals()),
            FacetGroup::new(
                FacetKind::Category,
                store.categories().iter().map(|c| c.name().to_string()).collect(),
            ),
        ];

        let old = std::mem::take(&mut self.groups);
        self.groups = fresh
            .into_iter()
            .map(|mut group| {
                if let Some(prev) = old.iter().find(|g| g.kind == group.kind) {
                    group.expanded = prev.expanded;
                    group.selected = prev
                        .selected_value()
                        .and_then(|v| group.values.iter().position(|x| x == v));
                }
                group
            })
            .collect();
        self.clamp_cursor();
    }

    /// Flatten the groups into visible rows, respecting expansion.
    pub fn visible(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            rows.push(Row::Group(g));
            if group.expanded {
                rows.extend((0..group.values.len()).map(|v| Row::Value(g, v)));
            }
        }
        rows
    }

    pub fn has_selection(&self) -> bool {
        self.groups.iter().any(|g| g.selected.is_some())
    }

    pub fn clear_selection(&mut self) {
        for group in &mut self.groups {
            group.selected = None;
        }
    }

    /// Write the selected facets into `filter`.
    pub fn apply_to(&self, filter: &mut RecordFilter) {
        filter.doctor = None;
        filter.hospital = None;
        filter.category = None;
        for group in &self.groups {
            let Some(value) = group.selected_value() else { continue };
            match group.kind {
                FacetKind::Doctor => filter.doctor = Some(value.to_string()),
                FacetKind::Hospital => filter.hospital = Some(value.to_string()),
                FacetKind::Category => filter.category = value.parse::<Category>().ok(),
            }
        }
    }

    /// Handle an [`AppEvent`]. Returns `true` when the selection changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let row = self.visible().get(self.cursor).copied();
        match (event, row) {
            (AppEvent::Nav(Direction::Up), _) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "filters: cursor up");
            }
            (AppEvent::Nav(Direction::Down), _) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "filters: cursor down");
            }
            (AppEvent::Nav(Direction::Right), Some(Row::Group(g))) => {
                self.groups[g].expanded = true;
            }
            (AppEvent::Nav(Direction::Left), Some(Row::Group(g) | Row::Value(g, _))) => {
                self.groups[g].expanded = false;
                self.cursor = self.group_row(g);
                tracing::debug!(group = self.groups[g].kind.title(), "filters: collapse");
            }
            (AppEvent::Enter, Some(Row::Group(g))) => {
                self.groups[g].expanded = !self.groups[g].expanded;
                self.clamp_cursor();
            }
            (AppEvent::Enter | AppEvent::Char(' '), Some(Row::Value(g, v))) => {
                self.groups[g].toggle(v);
                tracing::debug!(
                    group = self.groups[g].kind.title(),
                    selected = ?self.groups[g].selected_value(),
                    "filters: selection toggled"
                );
                return true;
            }
            _ => {}
        }
        false
    }

    fn group_row(&self, group: usize) -> usize {
        self.visible()
            .iter()
            .position(|r| *r == Row::Group(group))
            .unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        self.cursor = self.cursor.min(max);
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterTree<'a> {
    state: &'a FilterTreeState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterTree<'a> {
    pub fn new(state: &'a FilterTreeState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    fn value_style(&self, kind: FacetKind, value: &str) -> Style {
        match kind {
            FacetKind::Doctor => self.theme.doctor_style(value),
            FacetKind::Category => value
                .parse::<Category>()
                .map(|c| self.theme.category_style(c))
                .unwrap_or_default(),
            FacetKind::Hospital => Style::default(),
        }
    }
}

impl Widget for FilterTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Filters").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .visible()
            .into_iter()
            .map(|row| match row {
                Row::Group(g) => {
                    let group = &self.state.groups[g];
                    let arrow = if group.expanded { "▼ " } else { "▶ " };
                    let mark = if group.selected.is_some() { " ●" } else { "" };
                    ListItem::new(Line::from(Span::styled(
                        format!("{arrow}{}{mark}", group.kind.title()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )))
                }
                Row::Value(g, v) => {
                    let group = &self.state.groups[g];
                    let value = group.values[v].as_str();
                    let mark = if group.selected == Some(v) { "◉ " } else { "○ " };
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("  {mark}")),
                        Span::styled(value.to_string(), self.value_style(group.kind, value)),
                    ]))
                }
            })
            .collect();

        let highlight = if self.focused { self.theme.list_cursor } else { Style::default() };
        let list = List::new(items).highlight_style(highlight);
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
