use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::{MODAL_HEIGHT_PERCENT, MODAL_WIDTH_PERCENT};

/// Regions of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainAreas {
    pub header: Rect,
    pub drop_zone: Rect,
    pub destination: Rect,
    pub status: Rect,
    pub notice: Rect,
    pub footer: Rect,
}

pub fn main_areas(area: Rect) -> MainAreas {
    let [header, drop_zone, destination, status, notice, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    MainAreas {
        header,
        drop_zone,
        destination,
        status,
        notice,
        footer,
    }
}

pub fn modal_area(area: Rect) -> Rect {
    centered_rect(MODAL_WIDTH_PERCENT, MODAL_HEIGHT_PERCENT, area)
}

/// Rectangle of the given percentage size centered in `area`, never smaller
/// than 20x8 cells unless `area` itself is.
pub fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(height_percent) / 100) as u16;
    let width = width.max(20).min(area.width);
    let height = height.max(8).min(area.height);

    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}
