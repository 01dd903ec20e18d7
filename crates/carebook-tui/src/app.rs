//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use std::{io, path::Path, time::Duration};

use carebook_core::{
    config::{Config, Keymap},
    export::export_to_path,
    types::check_date_format,
    Error, MedicalRecord, RecordFilter, RecordId, RecordStore, SortOrder,
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        confirm::ConfirmDelete,
        filter_tree::{FilterTree, FilterTreeState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        record_detail::RecordDetail,
        record_form::{FormMode, RecordForm, RecordFormState},
        record_list::{RecordList, RecordListState},
        status_bar::{Notice, StatusBar},
    },
};

// ---------------------------------------------------------------------------
// Focus + popups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Records,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

/// Modal overlay drawn above the panes; it receives every key while open.
#[derive(Debug, Clone)]
pub enum Popup {
    Help,
    Detail(RecordId),
    Form(RecordFormState),
    ConfirmDelete(RecordId),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: RecordStore,
    /// Text, facets, date bounds, and order of the record list.
    pub filter: RecordFilter,
    pub filters: FilterTreeState,
    pub records: RecordListState,
    pub query: QueryBarState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub popup: Option<Popup>,
    pub notice: Option<Notice>,
    pub theme: Theme,
    pub config: Config,
    pub keys: Keymap,
    pub quit: bool,
}

impl AppState {
    pub fn new(store: RecordStore, config: Config, theme: Theme) -> anyhow::Result<Self> {
        let keys = config.keymap()?;
        check_date_format(&config.ui.date_format)?;
        let order = if config.ui.newest_first {
            SortOrder::NewestFirst
        } else {
            SortOrder::OldestFirst
        };

        Ok(Self {
            filters: FilterTreeState::from_store(&store),
            records: RecordListState::new(config.ui.show_dates, config.ui.date_format.clone()),
            filter: RecordFilter::new().order(order),
            store,
            query: QueryBarState::default(),
            command_bar: CommandBarState::default(),
            focus: Focus::Records,
            prev_focus: Focus::Records,
            popup: None,
            notice: None,
            theme,
            config,
            keys,
            quit: false,
        })
    }

    /// The filtered, sorted records the list shows.
    pub fn visible(&self) -> Vec<&MedicalRecord> {
        self.store.query(&self.filter)
    }

    /// The record under the list cursor.
    pub fn selected(&self) -> Option<&MedicalRecord> {
        self.visible().get(self.records.cursor).copied()
    }

    /// Pull the query text and facet selection into the filter.
    pub fn filter_changed(&mut self) {
        self.filter.text = self.query.query().to_string();
        self.filters.apply_to(&mut self.filter);
        self.records.reset();
        tracing::debug!(filter = ?self.filter, "filter changed");
    }

    pub fn date_bounds_changed(&mut self) {
        self.records.reset();
        if let (Some(from), Some(to)) = (self.filter.from, self.filter.to) {
            if from > to {
                self.notice = Some(Notice::Error("date range is empty (from > to)".into()));
            }
        }
    }

    /// Reset facets and date bounds; the search text and order stay.
    pub fn clear_filters(&mut self) {
        self.filters.clear_selection();
        self.filter.clear_facets();
        self.records.reset();
        self.notice = Some(Notice::Info("filters cleared".into()));
    }

    fn store_changed(&mut self) {
        self.filters.rebuild(&self.store);
        self.filters.apply_to(&mut self.filter);
        let total = self.visible().len();
        self.records.clamp(total);
    }

    /// Write the visible records to `path`, reporting the outcome as a notice.
    pub fn export_view(&mut self, path: &Path) {
        let result = export_to_path(&self.visible(), path);
        self.notice = Some(match result {
            Ok(n) => Notice::Info(format!("exported {n} records to {}", path.display())),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                Notice::Error(e.to_string())
            }
        });
    }

    fn save_form(&mut self, mut form: RecordFormState) -> Option<RecordFormState> {
        let draft = form.draft();
        let result = match form.mode {
            FormMode::Add => {
                draft.into_new_record(self.store.next_id(), chrono::Local::now().date_naive())
            }
            FormMode::Edit(ref id) => match self.store.get(id) {
                Some(existing) => draft.apply_to(existing),
                None => Err(Error::RecordNotFound(id.to_string())),
            },
        };

        match result {
            Ok(record) => {
                let id = record.id.clone();
                self.store.upsert(record);
                self.store_changed();
                self.notice = Some(Notice::Info(format!("saved {id}")));
                None
            }
            Err(e) => {
                form.error = Some(e.to_string());
                Some(form)
            }
        }
    }

    fn delete(&mut self, id: &RecordId) {
        self.notice = Some(match self.store.remove(id) {
            Ok(record) => {
                self.store_changed();
                Notice::Info(format!("deleted {} ({})", record.diagnosis, record.id))
            }
            Err(e) => Notice::Error(e.to_string()),
        });
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(store: RecordStore, config: Config, theme: Theme) -> anyhow::Result<Self> {
        Ok(App { state: AppState::new(store, config, theme)? })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                let app_event = if is_insert_mode(&self.state) {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw, &self.state.keys)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Popups intercept all events.
        if let Some(popup) = s.popup.take() {
            s.popup = handle_popup(s, popup, event);
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => match Command::parse(s.command_bar.input.as_str()) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                        execute_command(s, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                    }
                    Err(msg) => s.command_bar.error = Some(msg),
                },
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                s.popup = Some(Popup::Help);
            }

            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape | AppEvent::Enter if s.focus == Focus::QueryBar => {
                tracing::debug!("focus: QueryBar -> Records");
                s.focus = Focus::Records;
            }

            AppEvent::FocusNext | AppEvent::FocusPrev => {
                let next = match (s.focus, event == AppEvent::FocusNext) {
                    (Focus::Filters, true) | (Focus::QueryBar, false) => Focus::Records,
                    (Focus::Records, true) | (Focus::Filters, false) => Focus::QueryBar,
                    _ => Focus::Filters,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            AppEvent::ToggleSort => {
                s.filter.order = s.filter.order.toggle();
                s.records.reset();
                tracing::debug!(order = s.filter.order.label(), "sort toggled");
            }

            AppEvent::Export => {
                let path = std::path::PathBuf::from(&s.config.export.file_name);
                s.export_view(&path);
            }

            AppEvent::AddRecord => {
                s.popup = Some(Popup::Form(RecordFormState::add()));
            }

            AppEvent::EditRecord => {
                if let Some(form) = s.selected().map(RecordFormState::edit) {
                    s.popup = Some(Popup::Form(form));
                }
            }

            AppEvent::DeleteRecord => {
                if let Some(id) = s.selected().map(|r| r.id.clone()) {
                    s.popup = Some(Popup::ConfirmDelete(id));
                }
            }

            AppEvent::ClearFilters => s.clear_filters(),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Handle an event while `popup` is open. Returns the popup to keep showing,
/// or `None` to close it.
fn handle_popup(s: &mut AppState, popup: Popup, event: AppEvent) -> Option<Popup> {
    match popup {
        Popup::Help => match event {
            AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                tracing::debug!("help popup closed");
                None
            }
            _ => Some(Popup::Help),
        },
        Popup::Detail(id) => match event {
            AppEvent::Escape | AppEvent::Enter | AppEvent::Quit => None,
            AppEvent::EditRecord => {
                let form = s.store.get(&id).map(RecordFormState::edit);
                Some(form.map(Popup::Form).unwrap_or(Popup::Detail(id)))
            }
            _ => Some(Popup::Detail(id)),
        },
        Popup::ConfirmDelete(id) => match event {
            AppEvent::Char('y') | AppEvent::Char('Y') | AppEvent::Enter => {
                tracing::debug!(id = %id, "delete confirmed");
                s.delete(&id);
                None
            }
            AppEvent::Char('n') | AppEvent::Char('N') | AppEvent::Escape | AppEvent::Quit => None,
            _ => Some(Popup::ConfirmDelete(id)),
        },
        Popup::Form(mut form) => match event {
            AppEvent::Escape => {
                tracing::debug!("form cancelled");
                None
            }
            AppEvent::Quit => {
                s.quit = true;
                None
            }
            AppEvent::Enter => s.save_form(form).map(Popup::Form),
            other => {
                form.handle(&other);
                Some(Popup::Form(form))
            }
        },
    }
}

/// True when alphabetic keys should type characters rather than trigger
/// shortcuts.
fn is_insert_mode(s: &AppState) -> bool {
    matches!(s.popup, Some(Popup::Form(_))) || matches!(s.focus, Focus::QueryBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Filters => {
            if s.filters.handle(&event) {
                s.filter_changed();
            }
        }
        Focus::Records => match event {
            AppEvent::Enter => {
                if let Some(id) = s.selected().map(|r| r.id.clone()) {
                    tracing::debug!(id = %id, "detail opened");
                    s.popup = Some(Popup::Detail(id));
                }
            }
            other => {
                let total = s.visible().len();
                s.records.handle(&other, total);
            }
        },
        Focus::QueryBar => {
            if s.query.handle(&event) {
                s.filter_changed();
            }
        }
        Focus::Command => {} // handled before dispatch
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let pct = state.config.ui.filter_pane_width_pct.min(80);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    let visible = state.visible();
    let counts = (visible.len(), state.store.len());

    frame.render_widget(
        StatusBar::new(&state.filter, counts.0, counts.1, state.notice.as_ref(), &state.theme),
        vert[0],
    );
    frame.render_widget(
        FilterTree::new(&state.filters, state.focus == Focus::Filters, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        RecordList::new(
            &visible,
            &state.records,
            state.focus == Focus::Records,
            "Records",
            &state.theme,
        ),
        horiz[1],
    );
    let query_bar = QueryBar::new(&state.query, state.focus == Focus::QueryBar, counts, &state.theme);
    let query_cursor = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);

    match state.popup {
        Some(Popup::Help) => frame.render_widget(HelpPopup::new(&state.keys, &state.theme), area),
        Some(Popup::Detail(ref id)) => {
            if let Some(record) = state.store.get(id) {
                frame.render_widget(
                    RecordDetail::new(record, &state.config.ui.date_format, &state.theme),
                    area,
                );
            }
        }
        Some(Popup::ConfirmDelete(ref id)) => {
            if let Some(record) = state.store.get(id) {
                frame.render_widget(ConfirmDelete::new(record, &state.theme), area);
            }
        }
        Some(Popup::Form(ref form)) => {
            frame.render_widget(RecordForm::new(form, &state.theme), area);
            if let Some(pos) = form.cursor_position(area) {
                frame.set_cursor_position(pos);
            }
            return;
        }
        None => {}
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar && state.popup.is_none() {
        frame.set_cursor_position(query_cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::event::Direction;
    use carebook_core::{dataset::demo_records, Category};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(RecordStore::new(demo_records()), Config::defaults(), Theme::load_default())
            .unwrap()
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle(AppEvent::Char(c));
        }
    }

    fn diagnoses(app: &App) -> Vec<String> {
        app.state().visible().iter().map(|r| r.diagnosis.clone()).collect()
    }

    #[test]
    fn live_search_filters_as_you_type() {
        let mut app = app();
        app.handle(AppEvent::QueryFocus);
        type_str(&mut app, "Emly");
        assert_eq!(diagnoses(&app), ["Acute Bronchitis"]);
        type_str(&mut app, "x");
        assert!(diagnoses(&app).is_empty());
        app.handle(AppEvent::Backspace);
        app.handle(AppEvent::Escape);
        assert_eq!(app.state().focus, Focus::Records);
        assert_eq!(app.state().filter.text, "Emly");
    }

    #[test]
    fn toggle_sort_reverses_list() {
        let mut app = app();
        app.handle(AppEvent::ToggleSort);
        assert_eq!(
            diagnoses(&app),
            ["Minor Ankle Sprain", "Annual Check-up", "Acute Bronchitis"]
        );
    }

    #[test]
    fn facet_selection_from_filter_pane() {
        let mut app = app();
        app.handle(AppEvent::FocusNext); // Records -> QueryBar
        app.handle(AppEvent::FocusNext); // QueryBar -> Filters
        assert_eq!(app.state().focus, Focus::Filters);
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Enter); // Benjamin Lee
        assert_eq!(diagnoses(&app), ["Annual Check-up"]);

        app.handle(AppEvent::ClearFilters);
        assert_eq!(diagnoses(&app).len(), 3);
        assert!(!app.state().filters.has_selection());
    }

    #[test]
    fn command_mode_sets_date_bounds() {
        let mut app = app();
        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "from 2024-01-01");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().focus, Focus::Records);
        assert_eq!(diagnoses(&app), ["Acute Bronchitis", "Annual Check-up"]);

        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "bogus");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().focus, Focus::Command);
        assert!(app.state().command_bar.error.is_some());
        app.handle(AppEvent::Escape);
        assert_eq!(app.state().focus, Focus::Records);
    }

    #[test]
    fn add_record_through_form() {
        let mut app = app();
        app.handle(AppEvent::AddRecord);
        type_str(&mut app, "Ada Park");
        app.handle(AppEvent::Enter);
        // validation keeps the form open with an error
        match app.state().popup {
            Some(Popup::Form(ref form)) => assert!(form.error.is_some()),
            ref other => panic!("expected form, got {other:?}"),
        }

        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::FocusNext);
        type_str(&mut app, "Migraine");
        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::FocusNext);
        type_str(&mut app, "Rest");
        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::Nav(Direction::Right));
        app.handle(AppEvent::Enter);

        assert!(app.state().popup.is_none());
        let added = app.state().store.get(&RecordId::new("rec4")).unwrap();
        assert_eq!(added.doctor_name, "Ada Park");
        assert_eq!(added.category, Category::Procedure);
        assert_eq!(app.state().filters.groups[0].values.len(), 4);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app();
        app.handle(AppEvent::DeleteRecord);
        app.handle(AppEvent::Char('n'));
        assert_eq!(app.state().store.len(), 3);

        app.handle(AppEvent::DeleteRecord);
        app.handle(AppEvent::Char('y'));
        assert_eq!(app.state().store.len(), 2);
        assert!(app.state().store.get(&RecordId::new("rec1")).is_none());
    }

    #[test]
    fn edit_keeps_id_and_date() {
        let mut app = app();
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Enter);
        assert!(matches!(app.state().popup, Some(Popup::Detail(ref id)) if id.as_str() == "rec2"));
        app.handle(AppEvent::EditRecord);
        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::FocusNext);
        type_str(&mut app, " (2024)");
        app.handle(AppEvent::Enter);

        let edited = app.state().store.get(&RecordId::new("rec2")).unwrap();
        assert_eq!(edited.diagnosis, "Annual Check-up (2024)");
        assert_eq!(edited.date, demo_records()[1].date);
        assert_eq!(edited.symptoms, ["None"]);
    }

    #[test]
    fn export_with_no_matches_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut app = app();
        app.handle(AppEvent::QueryFocus);
        type_str(&mut app, "zzzz");
        app.state.export_view(&path);
        assert!(matches!(app.state().notice, Some(Notice::Error(_))));
        assert!(!path.exists());
    }

    #[test]
    fn rejects_unrenderable_date_format() {
        let mut config = Config::defaults();
        config.ui.date_format = "%Q".into();
        let theme = Theme::load_default();
        assert!(App::new(RecordStore::new(demo_records()), config, theme).is_err());
    }

    #[test]
    fn draws_without_panicking() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app.state())).unwrap();

        app.handle(AppEvent::Enter);
        terminal.draw(|f| draw(f, app.state())).unwrap();
        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Char('?'));
        terminal.draw(|f| draw(f, app.state())).unwrap();
    }
}
