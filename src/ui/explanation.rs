use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::density::Density;
use crate::model::Question;
use crate::sequencer::SessionState;
use crate::ui::wrap::wrap_text;
use crate::ui::{completion_pct, View};

/// Full-frame explanation screen with the typing cursor.
pub fn draw_explanation(
    f: &mut Frame,
    area: Rect,
    view: &View,
    question: &Question,
    session: &SessionState,
) {
    let full = question.explanation_chars();
    let typed = session.explanation_buffer.chars().count();
    let density = view.density.classify_explanation(question.explanation_text());

    // Short explanations get a narrow centered column, long ones use the width.
    let margin_x = match density {
        Density::Compact => area.width / 5,
        Density::Medium => area.width / 8,
        Density::Dense => 2,
    };
    let [_, content, _] = Layout::horizontal([
        Constraint::Length(margin_x),
        Constraint::Min(10),
        Constraint::Length(margin_x),
    ])
    .areas(area);

    let [header_area, text_area, status_area, progress_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(content);

    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Explanation",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, header_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner_width = text_area.width.saturating_sub(4) as usize;

    let text_style = match density {
        Density::Compact => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::White),
    };
    let mut lines: Vec<Line> = wrap_text(&session.explanation_buffer, inner_width.max(1))
        .into_iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), text_style)))
        .collect();
    if typed < full {
        let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(vec![Span::raw(" "), cursor])),
        }
    }
    f.render_widget(Paragraph::new(lines).block(block), text_area);

    let status = if session.halted {
        "End of quiz"
    } else if typed >= full {
        "Moving to next question..."
    } else {
        "Reading explanation..."
    };
    f.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        status_area,
    );

    let total = view.questions.len();
    let progress = format!(
        "Question {} of {} • {}% Complete",
        session.index + 1,
        total,
        completion_pct(session.index, total)
    );
    f.render_widget(
        Paragraph::new(vec![Line::from(""), Line::from(progress)])
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        progress_area,
    );
}
