use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::ui::wrap::wrap_text;
use crate::ui::{completion_pct, View};

pub fn draw_sidebar(f: &mut Frame, area: Rect, view: &View, index: usize) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let promo = promo_lines(view, width);
    let social = social_lines(view, width);

    let [promo_area, progress_area, _, social_area] = Layout::vertical([
        Constraint::Length(promo.len() as u16),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(social.len() as u16),
    ])
    .areas(inner);

    f.render_widget(Paragraph::new(promo), promo_area);
    draw_progress(f, progress_area, index, view.questions.len());
    f.render_widget(Paragraph::new(social), social_area);
}

fn promo_lines(view: &View, width: usize) -> Vec<Line<'static>> {
    let Some(link) = view.branding.promotion_link.as_deref() else {
        return Vec::new();
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Join us",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    for l in wrap_text(link, width) {
        lines.push(Line::from(Span::styled(
            format!(" {}", l),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));
    lines
}

fn social_lines(view: &View, width: usize) -> Vec<Line<'static>> {
    let Some(text) = view.branding.social_proof.as_deref() else {
        return Vec::new();
    };
    let mut lines: Vec<Line> = wrap_text(text, width)
        .into_iter()
        .map(|l| {
            Line::from(Span::styled(
                format!(" {}", l),
                Style::default().fg(Color::Rgb(247, 200, 115)),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines
}

fn draw_progress(f: &mut Frame, area: Rect, index: usize, total: usize) {
    let [label_area, gauge_area, _] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let label = Paragraph::new(Line::from(Span::styled(
        format!(" Question {} of {}", index + 1, total),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(label, label_area);

    let gauge_area = Rect {
        x: gauge_area.x + 1,
        width: gauge_area.width.saturating_sub(2),
        ..gauge_area
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::LightBlue).bg(Color::Rgb(45, 45, 50)))
        .percent(completion_pct(index, total))
        .label("");
    f.render_widget(gauge, gauge_area);
}
