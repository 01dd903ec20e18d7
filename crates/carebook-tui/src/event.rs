//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every
//! [`crossterm::event::Event`] and match on the returned [`AppEvent`] instead
//! of crossterm types. The single-character action keys come from the user's
//! [`Keymap`]; the defaults are listed below.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `QueryFocus`               |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `G`                     | `ScrollToEnd`              |
//! | `s`                     | `ToggleSort`               |
//! | `x`                     | `Export`                   |
//! | `a`                     | `AddRecord`                |
//! | `e`                     | `EditRecord`               |
//! | `d`                     | `DeleteRecord`             |
//! | `c`                     | `ClearFilters`             |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar, record form) is focused,
//! the event loop calls [`to_app_event_insert`] instead. In insert mode every
//! printable character is forwarded as `Char`, arrow keys still produce
//! `Nav`, and only `Ctrl+c`, `Escape`, `Enter`, `Tab`, `BackTab`, and
//! `Backspace` keep their special bindings.

use carebook_core::config::Keymap;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list, tree, and text-cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    /// Move keyboard focus to the previous pane or form field (Shift+Tab).
    FocusPrev,
    /// Transfer focus to the query bar.
    QueryFocus,
    /// Scroll the record list up one page.
    ScrollUp,
    /// Scroll the record list down one page.
    ScrollDown,
    /// Jump to the last record in the list.
    ScrollToEnd,
    /// Flip between newest-first and oldest-first.
    ToggleSort,
    /// Export the filtered records to the configured file.
    Export,
    /// Open the add-record form.
    AddRecord,
    /// Open the edit form for the record under the cursor.
    EditRecord,
    /// Ask to delete the record under the cursor.
    DeleteRecord,
    /// Reset the facet and date filters.
    ClearFilters,
    /// Navigate within the focused pane.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm the active input, open a record, or toggle a filter.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (query bar focus, popup, form).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event, keys: &Keymap) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key, keys),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

/// Resolve a configured single-character action key. Uppercase bindings
/// match whether or not the terminal reports SHIFT.
fn action_for(c: char, keys: &Keymap) -> Option<AppEvent> {
    let bindings = [
        (keys.query_focus, AppEvent::QueryFocus),
        (keys.toggle_sort, AppEvent::ToggleSort),
        (keys.export, AppEvent::Export),
        (keys.add_record, AppEvent::AddRecord),
        (keys.edit_record, AppEvent::EditRecord),
        (keys.delete_record, AppEvent::DeleteRecord),
        (keys.clear_filters, AppEvent::ClearFilters),
        (keys.scroll_to_end, AppEvent::ScrollToEnd),
    ];
    bindings
        .into_iter()
        .find(|(bound, _)| *bound == c)
        .map(|(_, event)| event)
}

fn map_key(key: KeyEvent, keys: &Keymap) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        // Configured action keys win over the fixed navigation letters
        Char(c) if plain && action_for(c, keys).is_some() => action_for(c, keys),

        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),
        End => Some(AppEvent::ScrollToEnd),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => {
            Some(AppEvent::Nav(Direction::Right))
        }

        Char(c) if plain => Some(AppEvent::Char(c)),

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
