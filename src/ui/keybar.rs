use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::View;

pub fn draw_footer(f: &mut Frame, area: Rect, view: &View) {
    let Some(text) = view.branding.footer_text.as_deref() else {
        return;
    };
    let widget = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Gray),
    )))
    .alignment(ratatui::layout::Alignment::Center)
    .style(Style::default().bg(Color::Rgb(30, 30, 36)));
    f.render_widget(widget, area);
}

pub fn draw_keybar(f: &mut Frame, area: Rect, view: &View) {
    let bindings: &[(&str, &str)] = if view.dialog.is_some() {
        &[("Enter", "confirm"), ("Esc", "cancel")]
    } else {
        &[("q", "quit"), ("?", "help")]
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    if let Some(status) = view.status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
