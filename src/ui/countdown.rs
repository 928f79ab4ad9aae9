use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Gauge};
use ratatui::Frame;

use crate::sequencer::SessionState;
use crate::ticker::format_countdown;

const GREEN: Color = Color::Rgb(34, 208, 108);
const AMBER: Color = Color::Rgb(247, 200, 115);

pub fn countdown_color(progress_pct: f64) -> Color {
    if progress_pct > 30.0 {
        GREEN
    } else {
        AMBER
    }
}

pub fn draw_countdown(f: &mut Frame, area: Rect, session: &SessionState) {
    let color = countdown_color(session.progress_pct);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT))
        .gauge_style(Style::default().fg(color).bg(Color::Rgb(45, 45, 50)))
        .ratio((session.progress_pct / 100.0).clamp(0.0, 1.0))
        .label(ratatui::text::Span::styled(
            format_countdown(session.seconds_left),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = Rect {
        y: area.y + area.height.saturating_sub(1) / 2,
        height: area.height.min(1),
        ..area
    };
    f.render_widget(gauge, inner);
}
