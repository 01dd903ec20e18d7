//! `:` commands: parsing and execution.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `dates` | Toggle the date column |
//! | `sort <newest\|oldest>` | Set the sort order |
//! | `from <date\|->`, `to <date\|->` | Set or clear a date bound |
//! | `clear` | Clear facets and date bounds |
//! | `export [path]` | Export the filtered records |

use std::path::PathBuf;

use carebook_core::{types::parse_date, SortOrder};
use chrono::NaiveDate;

use crate::{
    app::{AppState, Popup},
    theme::{Theme, THEME_NAMES},
};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Dates,
    Sort(SortOrder),
    /// `None` clears the bound.
    From(Option<NaiveDate>),
    To(Option<NaiveDate>),
    Clear,
    /// `None` exports to the configured file name.
    Export(Option<PathBuf>),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Err(message)` on failure. An empty string returns `Err("")`
    /// as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "dates" => Ok(Command::Dates),
            "clear" => Ok(Command::Clear),
            "theme" if rest.is_empty() => {
                Err(format!("usage: theme <{}>", THEME_NAMES.join("|")))
            }
            "theme" if Theme::by_name(rest).is_some() => Ok(Command::Theme(rest.to_string())),
            "theme" => Err(format!("unknown theme: {}", rest.to_ascii_lowercase())),
            "sort" => match rest {
                "newest" | "new" | "desc" => Ok(Command::Sort(SortOrder::NewestFirst)),
                "oldest" | "old" | "asc" => Ok(Command::Sort(SortOrder::OldestFirst)),
                _ => Err("usage: sort <newest|oldest>".to_string()),
            },
            "from" => parse_bound(word, rest).map(Command::From),
            "to" => parse_bound(word, rest).map(Command::To),
            "export" => Ok(Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_bound(word: &str, rest: &str) -> Result<Option<NaiveDate>, String> {
    match rest {
        "" => Err(format!("usage: {word} <YYYY-MM-DD|->")),
        "-" => Ok(None),
        date => parse_date(date).map(Some).map_err(|e| e.to_string()),
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => {
            s.popup = match s.popup {
                Some(Popup::Help) => None,
                _ => Some(Popup::Help),
            };
        }
        Command::Theme(name) => {
            if let Some(theme) = Theme::by_name(&name) {
                s.theme = theme;
            }
        }
        Command::Dates => s.records.show_dates = !s.records.show_dates,
        Command::Sort(order) => {
            s.filter.order = order;
            s.records.reset();
        }
        Command::From(bound) => {
            s.filter.from = bound;
            s.date_bounds_changed();
        }
        Command::To(bound) => {
            s.filter.to = bound;
            s.date_bounds_changed();
        }
        Command::Clear => s.clear_filters(),
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(&s.config.export.file_name));
            s.export_view(&path);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
