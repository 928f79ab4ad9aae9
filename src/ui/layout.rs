use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::density::Density;

pub struct AppLayout {
    pub titlebar: Rect,
    pub countdown: Rect,
    pub main: Rect,
    pub sidebar: Rect,
    pub footer: Rect,
    pub keybar: Rect,
}

/// Width of the right-hand branding column for a given density.
fn sidebar_width(area: Rect, density: Density) -> u16 {
    let wanted = match density {
        Density::Compact => 30,
        Density::Medium => 28,
        Density::Dense => 24,
    };
    // Give the question at least two thirds of a narrow terminal.
    wanted.min(area.width / 3)
}

pub fn compute_layout(area: Rect, density: Density) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar
            Constraint::Length(3), // countdown
            Constraint::Min(5),    // middle (main + sidebar)
            Constraint::Length(1), // footer
            Constraint::Length(1), // keybar
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(sidebar_width(area, density)),
        ])
        .split(vertical[2]);

    AppLayout {
        titlebar: vertical[0],
        countdown: vertical[1],
        main: middle[0],
        sidebar: middle[1],
        footer: vertical[3],
        keybar: vertical[4],
    }
}

/// Number of option columns: two side by side unless options are long or
/// the screen is narrow.
pub fn option_columns(width: u16, density: Density, option_count: usize) -> u16 {
    if option_count < 2 || density == Density::Dense || width < 60 {
        1
    } else {
        2
    }
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
