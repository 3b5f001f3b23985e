// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Spotlight (5 rows)                                |
// +-------------------------+------------------------+
// | Entry (4 rows)           | Draft Board (60%)      |
// +- Teams (fill) ----------+ / Final Order          |
// |                          |                        |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: title, phase, weighted mode, soundtrack.
    pub status_bar: Rect,
    /// The latest reveal, large.
    pub spotlight: Rect,
    /// Left column top: team name and ballot entry fields.
    pub entry: Rect,
    /// Left column: the roster with first-pick odds.
    pub teams: Rect,
    /// Right column: revealed picks, or the final order once complete.
    pub board: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(5), // spotlight
            Constraint::Min(8),    // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(vertical[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(horizontal[0]);

    AppLayout {
        status_bar: vertical[0],
        spotlight: vertical[1],
        entry: left[0],
        teams: left[1],
        board: horizontal[1],
        help_bar: vertical[3],
    }
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space. Used by the overlays.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
