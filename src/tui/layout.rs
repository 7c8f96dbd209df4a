//! Root layout computation for roster sidebar + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the expanded roster (character names).
pub const ROSTER_EXPANDED_WIDTH: u16 = 24;
/// Width of the collapsed roster (initial letters only).
pub const ROSTER_COLLAPSED_WIDTH: u16 = 3;
/// Auto-collapse roster below this terminal width.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 70;
/// Hide roster entirely below this terminal width.
pub const HIDE_ROSTER_THRESHOLD: u16 = 24;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Roster area (None if hidden).
    pub roster: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// Roster visibility derived from terminal width and user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl AppLayout {
    /// Compute layout regions from the terminal area and roster state.
    ///
    /// `user_collapsed`: the user has toggled collapse with Ctrl+B.
    pub fn compute(area: Rect, user_collapsed: bool) -> (Self, RosterVisibility) {
        let visibility = if area.width < HIDE_ROSTER_THRESHOLD {
            RosterVisibility::Hidden
        } else if user_collapsed || area.width < AUTO_COLLAPSE_THRESHOLD {
            RosterVisibility::Collapsed
        } else {
            RosterVisibility::Expanded
        };

        let rows = Layout::vertical([
            Constraint::Min(1),    // Content (roster + main)
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let roster_width = match visibility {
            RosterVisibility::Hidden => None,
            RosterVisibility::Collapsed => Some(ROSTER_COLLAPSED_WIDTH),
            RosterVisibility::Expanded => Some(ROSTER_EXPANDED_WIDTH),
        };

        let (roster, main) = match roster_width {
            None => (None, content_area),
            Some(width) => {
                let cols =
                    Layout::horizontal([Constraint::Length(width), Constraint::Min(1)])
                        .split(content_area);
                (Some(cols[0]), cols[1])
            }
        };

        (AppLayout { roster, main, status }, visibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_layout() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, RosterVisibility::Expanded);
        assert_eq!(layout.roster.unwrap().width, ROSTER_EXPANDED_WIDTH);
        assert_eq!(layout.status.height, 1);
    }

    #[test]
    fn test_collapsed_by_user() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, true);
        assert_eq!(vis, RosterVisibility::Collapsed);
        assert_eq!(layout.roster.unwrap().width, ROSTER_COLLAPSED_WIDTH);
    }

    #[test]
    fn test_auto_collapse_narrow() {
        let area = Rect::new(0, 0, 60, 40);
        let (_, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, RosterVisibility::Collapsed);
    }

    #[test]
    fn test_hidden_very_narrow() {
        let area = Rect::new(0, 0, 20, 40);
        let (layout, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, RosterVisibility::Hidden);
        assert!(layout.roster.is_none());
        assert_eq!(layout.main.width, 20);
    }

    #[test]
    fn test_roster_plus_main_fills_width() {
        let area = Rect::new(0, 0, 100, 30);
        let (layout, _) = AppLayout::compute(area, false);
        let roster_w = layout.roster.map(|s| s.width).unwrap_or(0);
        assert_eq!(roster_w + layout.main.width, area.width);
    }
}
