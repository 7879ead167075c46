//! Reusable TUI components
//!
//! - `keybindings` - Mode-aware key registry, footer hints and help content
//! - `help_overlay` - Floating help window

pub mod help_overlay;
pub mod keybindings;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle of `percent_x` x `percent_y` centered in `area`, never
/// smaller than `min_width` x `min_height` (clamped to `area`).
pub fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    area: Rect,
) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent) / 100) as u16;
    let width = scale(area.width, percent_x).max(min_width).min(area.width);
    let height = scale(area.height, percent_y).max(min_height).min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 50, 10, 10, area);
        assert_eq!(rect, Rect::new(20, 12, 60, 25));
    }

    #[test]
    fn test_centered_rect_respects_minimum() {
        let area = Rect::new(0, 0, 40, 20);
        let rect = centered_rect(10, 10, 30, 12, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 12);

        let tiny = Rect::new(0, 0, 10, 5);
        let rect = centered_rect(50, 50, 30, 12, tiny);
        assert_eq!((rect.width, rect.height), (10, 5));
    }
}
