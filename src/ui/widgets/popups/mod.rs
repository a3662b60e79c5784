//! Modal popup components

pub mod error;
pub mod help;

use ratatui::layout::Rect;

/// Rect centered in `area` sized as a percentage of it
pub(crate) fn centered_popup(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width as u32 * percent_x as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
