use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct FormLayout {
    pub header_area: Rect,
    pub fields_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct EditorLayout {
    pub header_area: Rect,
    pub record_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_form_chunks(area: Rect) -> FormLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    FormLayout {
        header_area: chunks[0],
        fields_area: chunks[1],
        preview_area: chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_editor_chunks(area: Rect) -> EditorLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    EditorLayout {
        header_area: chunks[0],
        record_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Centered popup rect for the confirmation dialogs.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_layout_heights() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = calculate_form_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.fields_area.height, 10);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.preview_area.height >= 5);
    }

    #[test]
    fn test_editor_layout_heights() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = calculate_editor_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.help_area.height, 3);
        // margin 1 top and bottom, fixed rows 3 + 1 + 3
        assert_eq!(layout.record_area.height, 48 - 7);
    }

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 8, area);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 16);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 8);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_rect(50, 8, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
