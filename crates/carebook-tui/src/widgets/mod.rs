//! Ratatui widgets for the carebook TUI.

use ratatui::layout::Rect;

pub mod command_bar;
pub mod confirm;
pub mod filter_tree;
pub mod help;
pub mod query_bar;
pub mod record_detail;
pub mod record_form;
pub mod record_list;
pub mod status_bar;
pub mod text_input;

/// A `width` × `height` rect centred in `area`, clipped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
