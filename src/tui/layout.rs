//! Root layout and the grid used for book cards.

use ratatui::layout::{Constraint, Layout, Rect};

/// Below this width the grid shows one card per row.
pub const TWO_COLUMN_MIN_WIDTH: u16 = 80;
/// At or above this width the grid shows three cards per row.
pub const THREE_COLUMN_MIN_WIDTH: u16 = 120;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        AppLayout {
            main: rows[0],
            status: rows[1],
        }
    }
}

/// Number of card columns for a content area of `width` cells.
pub fn grid_columns(width: u16) -> usize {
    if width >= THREE_COLUMN_MIN_WIDTH {
        3
    } else if width >= TWO_COLUMN_MIN_WIDTH {
        2
    } else {
        1
    }
}

/// Split one grid row into `columns` equal cells.
pub fn grid_cells(row: Rect, columns: usize) -> Vec<Rect> {
    let columns = columns.max(1);
    let constraints = vec![Constraint::Ratio(1, columns as u32); columns];
    Layout::horizontal(constraints).split(row).to_vec()
}

/// Calculate a centered rect using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
