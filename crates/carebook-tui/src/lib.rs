//! carebook TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use carebook_core::{config::Config, RecordStore};
use theme::{Theme, THEME_NAMES};

/// Start the TUI over `store`.
///
/// `theme` names one of [`theme::THEME_NAMES`]; an unknown name is an error.
pub fn run(store: RecordStore, config: Config, theme: Option<&str>) -> anyhow::Result<()> {
    let theme = resolve_theme(theme)?;
    tracing::info!(records = store.len(), "starting tui");
    App::new(store, config, theme)?.run()
}

/// The theme called `name`, or the default theme when no name is given.
pub fn resolve_theme(name: Option<&str>) -> anyhow::Result<Theme> {
    match name {
        None => Ok(Theme::load_default()),
        Some(name) => Theme::by_name(name).ok_or_else(|| {
            anyhow::anyhow!("unknown theme {name:?} (expected one of: {})", THEME_NAMES.join(", "))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_name_is_an_error() {
        let err = resolve_theme(Some("solarized")).unwrap_err().to_string();
        assert!(err.contains("solarized"), "{err}");
        assert!(err.contains("gruvbox"), "{err}");

        assert!(resolve_theme(None).is_ok());
        assert!(resolve_theme(Some("gruvbox-dark")).is_ok());
    }
}
