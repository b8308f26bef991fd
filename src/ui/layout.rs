use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub meter: Rect,
    pub control: Rect,
    pub message: Rect,
    pub log: Rect,
    pub footer: Rect,
}

pub fn layout_regions(area: Rect) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);
    Regions {
        header: rows[0],
        meter: rows[1],
        control: rows[2],
        message: rows[3],
        log: rows[4],
        footer: rows[5],
    }
}

/// Rect of at most `width` x `height`, centered in `area`.
pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
