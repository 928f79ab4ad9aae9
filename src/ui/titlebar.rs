use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::View;

pub fn draw_titlebar(f: &mut Frame, area: Rect, view: &View) {
    let title_text = format!("[ {} ]", view.branding.title());
    let counter_text = match view.session {
        Some(s) => format!(" Question {} of {} ", s.index + 1, view.questions.len()),
        None => String::new(),
    };

    // Center the title over the full width, counter right-aligned.
    let available = area.width as usize;
    let title_len = title_text.chars().count();
    let counter_len = counter_text.chars().count();
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + counter_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        Span::styled(
            title_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(counter_text, Style::default().fg(Color::Rgb(200, 200, 120))),
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
