//! Responsive layout management for different terminal sizes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Terminal width below which the two panels are stacked.
pub const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// Rows a scenario panel needs: 7 inputs, MRR, 6 bars, spacing and borders.
pub const PANEL_HEIGHT: u16 = 19;

/// Rows of the delta panel: 6 stages, the MRR difference and borders.
pub const DELTA_PANEL_HEIGHT: u16 = 9;

const FOOTER_HEIGHT: u16 = 2;

/// Layout mode based on terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Panels next to each other (A left, B right)
    SideBySide,
    /// Panel A above panel B
    Stacked,
}

impl LayoutMode {
    /// Determine layout mode from terminal width
    pub fn from_terminal_width(width: u16) -> Self {
        if width < SIDE_BY_SIDE_MIN_WIDTH {
            Self::Stacked
        } else {
            Self::SideBySide
        }
    }
}

/// Screen regions of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerLayout {
    pub mode: LayoutMode,
    /// Panel of scenario A, then B
    pub panels: [Rect; 2],
    pub deltas: Rect,
    pub footer: Rect,
}

/// Calculate main layout for the explorer
pub fn calculate_layout(area: Rect) -> ExplorerLayout {
    let mode = LayoutMode::from_terminal_width(area.width);

    let panel_rows = match mode {
        LayoutMode::SideBySide => Constraint::Min(PANEL_HEIGHT),
        LayoutMode::Stacked => Constraint::Min(PANEL_HEIGHT * 2),
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            panel_rows,
            Constraint::Length(DELTA_PANEL_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    let panel_direction = match mode {
        LayoutMode::SideBySide => Direction::Horizontal,
        LayoutMode::Stacked => Direction::Vertical,
    };
    let panels = Layout::default()
        .direction(panel_direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    ExplorerLayout {
        mode,
        panels: [panels[0], panels[1]],
        deltas: rows[1],
        footer: rows[2],
    }
}

/// Centered rectangle for overlays
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x.min(100)) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
