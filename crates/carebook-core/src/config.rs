//! Configuration types for carebook.
//!
//! [`Config::load`] reads `~/.config/carebook/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem, and
//! [`Config::load_from`] layers an explicit file over them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
show_dates            = true
date_format           = "%B %d, %Y"
filter_pane_width_pct = 25
newest_first          = true

[data]
# JSON dataset to open; leave empty for the built-in demo records.
path = ""

[export]
file_name = "medical-records.json"

[keybindings]
query_focus   = "/"
toggle_sort   = "s"
export        = "x"
add_record    = "a"
edit_record   = "e"
delete_record = "d"
clear_filters = "c"
scroll_to_end = "G"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_dates")]
    pub show_dates: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_filter_pane_width_pct")]
    pub filter_pane_width_pct: u16,
    #[serde(default = "default_newest_first")]
    pub newest_first: bool,
}

fn default_show_dates() -> bool { true }
fn default_date_format() -> String { crate::types::LONG_DATE_FORMAT.to_string() }
fn default_filter_pane_width_pct() -> u16 { 25 }
fn default_newest_first() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_dates: default_show_dates(),
            date_format: default_date_format(),
            filter_pane_width_pct: default_filter_pane_width_pct(),
            newest_first: default_newest_first(),
        }
    }
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub path: String,
}

impl DataConfig {
    /// The configured dataset file, or `None` for the demo records.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        let path = self.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_export_file_name() -> String { crate::export::DEFAULT_EXPORT_FILE.to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self { file_name: default_export_file_name() }
    }
}

/// `[keybindings]` section of `config.toml`, as written by the user.
///
/// Every value must be exactly one character; [`KeybindingsConfig::keymap`]
/// checks this and yields the resolved [`Keymap`].
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_toggle_sort")]
    pub toggle_sort: String,
    #[serde(default = "default_export")]
    pub export: String,
    #[serde(default = "default_add_record")]
    pub add_record: String,
    #[serde(default = "default_edit_record")]
    pub edit_record: String,
    #[serde(default = "default_delete_record")]
    pub delete_record: String,
    #[serde(default = "default_clear_filters")]
    pub clear_filters: String,
    #[serde(default = "default_scroll_to_end")]
    pub scroll_to_end: String,
}

fn default_query_focus() -> String { "/".to_string() }
fn default_toggle_sort() -> String { "s".to_string() }
fn default_export() -> String { "x".to_string() }
fn default_add_record() -> String { "a".to_string() }
fn default_edit_record() -> String { "e".to_string() }
fn default_delete_record() -> String { "d".to_string() }
fn default_clear_filters() -> String { "c".to_string() }
fn default_scroll_to_end() -> String { "G".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            query_focus: default_query_focus(),
            toggle_sort: default_toggle_sort(),
            export: default_export(),
            add_record: default_add_record(),
            edit_record: default_edit_record(),
            delete_record: default_delete_record(),
            clear_filters: default_clear_filters(),
            scroll_to_end: default_scroll_to_end(),
        }
    }
}

/// Resolved single-key bindings for the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub query_focus: char,
    pub toggle_sort: char,
    pub export: char,
    pub add_record: char,
    pub edit_record: char,
    pub delete_record: char,
    pub clear_filters: char,
    pub scroll_to_end: char,
}

impl KeybindingsConfig {
    pub fn keymap(&self) -> Result<Keymap> {
        Ok(Keymap {
            query_focus: single_char("query_focus", &self.query_focus)?,
            toggle_sort: single_char("toggle_sort", &self.toggle_sort)?,
            export: single_char("export", &self.export)?,
            add_record: single_char("add_record", &self.add_record)?,
            edit_record: single_char("edit_record", &self.edit_record)?,
            delete_record: single_char("delete_record", &self.delete_record)?,
            clear_filters: single_char("clear_filters", &self.clear_filters)?,
            scroll_to_end: single_char("scroll_to_end", &self.scroll_to_end)?,
        })
    }
}

fn single_char(action: &'static str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::Keybinding { action, value: value.to_string() }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/carebook/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start()).map_err(|e| Error::io(&path, e))?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Layer `path` (if it exists) over the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;

        cfg.keybindings.keymap()?;
        crate::types::check_date_format(&cfg.ui.date_format)?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Bindings resolved to characters.
    pub fn keymap(&self) -> Result<Keymap> {
        self.keybindings.keymap()
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("carebook")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert!(cfg.ui.show_dates);
        assert!(cfg.ui.newest_first);
        assert_eq!(cfg.ui.date_format, "%B %d, %Y");
        assert_eq!(cfg.ui.filter_pane_width_pct, 25);
        assert_eq!(cfg.data.dataset_path(), None);
        assert_eq!(cfg.export.file_name, "medical-records.json");

        let keys = cfg.keymap().unwrap();
        assert_eq!(keys.query_focus, '/');
        assert_eq!(keys.toggle_sort, 's');
        assert_eq!(keys.scroll_to_end, 'G');
    }

    #[test]
    fn user_file_overrides_defaults() {
        let file = write_config(
            "[ui]\nnewest_first = false\n\n[data]\npath = \"/srv/records.json\"\n\n[keybindings]\nexport = \"E\"\n",
        );
        let cfg = Config::load_from(file.path()).unwrap();
        assert!(!cfg.ui.newest_first);
        assert!(cfg.ui.show_dates);
        assert_eq!(cfg.data.dataset_path(), Some(PathBuf::from("/srv/records.json")));
        assert_eq!(cfg.keymap().unwrap().export, 'E');
        assert_eq!(cfg.keymap().unwrap().add_record, 'a');
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.export.file_name, "medical-records.json");
    }

    #[test]
    fn multi_char_binding_is_rejected() {
        let file = write_config("[keybindings]\ndelete_record = \"Del\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Keybinding { action: "delete_record", ref value } if value == "Del"
        ));
    }

    #[test]
    fn unknown_strftime_specifier_is_rejected() {
        let file = write_config("[ui]\ndate_format = \"%d %Q %Y\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::DateFormat(ref f) if f == "%d %Q %Y"));

        let file = write_config("[ui]\ndate_format = \"%Y-%m-%d\"\n");
        assert_eq!(Config::load_from(file.path()).unwrap().ui.date_format, "%Y-%m-%d");
    }

    #[test]
    fn empty_binding_is_rejected() {
        let cfg = KeybindingsConfig { toggle_sort: String::new(), ..Default::default() };
        assert!(cfg.keymap().is_err());
    }
}
