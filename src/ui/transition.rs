use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::layout::centered_rect;

pub fn draw_transition(f: &mut Frame, area: Rect, index: usize, total: usize) {
    let lines = vec![
        Line::from(Span::styled(
            "Next question loading...",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Question {} of {}", index + 2, total),
            Style::default().fg(Color::Gray),
        )),
    ];
    let rect = centered_rect(40, lines.len() as u16, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

pub fn draw_blank(f: &mut Frame, area: Rect) {
    let rect = centered_rect(30, 1, area);
    f.render_widget(
        Paragraph::new(Span::styled(
            "No questions found",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        rect,
    );
}
