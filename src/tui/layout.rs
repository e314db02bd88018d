//! Layout definitions for the TUI
//!
//! Dashboard on top, expense list below, status bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Budget numbers and the spend gauge
    pub dashboard: Rect,
    /// Expense log
    pub expenses: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10), // Dashboard
                Constraint::Min(3),     // Expenses
                Constraint::Length(1),  // Status bar
            ])
            .split(area);

        Self {
            dashboard: chunks[0],
            expenses: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// Layout inside the dashboard block
pub struct DashboardLayout {
    pub figures: Rect,
    pub gauge: Rect,
    pub period: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Allowance / spent / remaining
                Constraint::Length(1), // Gauge
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Today / month
            ])
            .split(area);

        Self {
            figures: chunks[0],
            gauge: chunks[1],
            period: chunks[3],
        }
    }
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.dashboard.height, 10);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.status_bar.y, 23);
        assert_eq!(layout.expenses.height, 13);
    }

    #[test]
    fn test_centered_rect_fixed() {
        let area = centered_rect_fixed(40, 8, Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(20, 8, 40, 8));

        let clipped = centered_rect_fixed(100, 30, Rect::new(0, 0, 80, 24));
        assert_eq!(clipped, Rect::new(0, 0, 80, 24));
    }
}
