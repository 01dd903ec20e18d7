//! Colour theme for the carebook TUI.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`] so the application works without any files on disk.
//! Call [`Theme::load_default`] at startup and pass the result through the
//! application as a shared reference; `:theme <name>` swaps it at runtime.
//!
//! # Colour assignment for doctors
//!
//! Doctor names are hashed to a stable index into the palette so the same
//! doctor always gets the same colour, regardless of list order.

use carebook_core::Category;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by `:theme`.
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    reversed: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.reversed {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    consultation: RawStyle,
    procedure: RawStyle,
    prescription: RawStyle,
    check_up: RawStyle,
    imaging: RawStyle,
    follow_up: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawList {
    cursor: RawStyle,
    date: RawStyle,
    label: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    bar: RawStyle,
    notice: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawDoctors {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    categories: RawCategories,
    borders: RawBorders,
    list: RawList,
    status: RawStatus,
    doctors: RawDoctors,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub category_consultation: Style,
    pub category_procedure: Style,
    pub category_prescription: Style,
    pub category_check_up: Style,
    pub category_imaging: Style,
    pub category_follow_up: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    /// Highlight for the row under the cursor.
    pub list_cursor: Style,
    pub list_date: Style,
    /// Field labels in the detail and form popups.
    pub list_label: Style,

    pub status_bar: Style,
    pub status_notice: Style,
    pub status_error: Style,

    doctor_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up an embedded theme by the name used in `:theme`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            category_consultation: raw.categories.consultation.into_style(),
            category_procedure: raw.categories.procedure.into_style(),
            category_prescription: raw.categories.prescription.into_style(),
            category_check_up: raw.categories.check_up.into_style(),
            category_imaging: raw.categories.imaging.into_style(),
            category_follow_up: raw.categories.follow_up.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            list_cursor: raw.list.cursor.into_style(),
            list_date: raw.list.date.into_style(),
            list_label: raw.list.label.into_style(),
            status_bar: raw.status.bar.into_style(),
            status_notice: raw.status.notice.into_style(),
            status_error: raw.status.error.into_style(),
            doctor_palette: raw
                .doctors
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    pub fn category_style(&self, category: Category) -> Style {
        match category {
            Category::Consultation => self.category_consultation,
            Category::Procedure => self.category_procedure,
            Category::Prescription => self.category_prescription,
            Category::CheckUp => self.category_check_up,
            Category::Imaging => self.category_imaging,
            Category::FollowUp => self.category_follow_up,
        }
    }

    /// Stable [`Style`] for a doctor name.
    pub fn doctor_style(&self, doctor: &str) -> Style {
        if self.doctor_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(doctor) % self.doctor_palette.len();
        Style::default().fg(self.doctor_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, ...), hex `#rrggbb`,
/// and `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s => s.strip_prefix("indexed:")?.parse().ok().map(Color::Indexed),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
