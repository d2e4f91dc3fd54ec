use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Explorer layout configuration
pub struct AppLayout {
    pub breadcrumb_area: Rect,
    pub list_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create the explorer layout:
    /// - Breadcrumb bar: top row
    /// - Entry list: 60% width (left)
    /// - Preview pane: 40% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Breadcrumb bar
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[1]);

        Self {
            breadcrumb_area: vertical_chunks[0],
            list_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

/// Rectangle of `width_percent` and fixed `height`, centred in `area`
pub fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * width_percent.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::new(area);

        assert_eq!(layout.breadcrumb_area.height, 1);
        assert_eq!(layout.breadcrumb_area.y, 0);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.list_area.height, 28);
        assert_eq!(layout.preview_area.height, 28);
        assert_eq!(layout.list_area.width, 60);
        assert_eq!(layout.preview_area.width, 40);
    }

    #[test]
    fn test_layout_minimum_height() {
        let area = Rect::new(0, 0, 100, 5);
        let layout = AppLayout::new(area);

        assert_eq!(layout.breadcrumb_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.list_area.height, 3);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = centered_rect(50, 5, area);
        assert_eq!(rect, Rect::new(25, 12, 50, 5));
    }

    #[test]
    fn test_centered_rect_clamps_height() {
        let area = Rect::new(0, 0, 40, 3);
        let rect = centered_rect(100, 10, area);
        assert_eq!(rect.height, 3);
        assert_eq!(rect.width, 40);
    }
}
