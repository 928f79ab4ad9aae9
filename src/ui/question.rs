use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::density::Density;
use crate::model::{option_label, Question};
use crate::sequencer::SessionState;
use crate::ui::layout::option_columns;
use crate::ui::wrap::wrap_text;

const CORRECT: Color = Color::Rgb(26, 180, 80);

pub fn draw_question(
    f: &mut Frame,
    area: Rect,
    question: &Question,
    session: &SessionState,
    density: Density,
) {
    let text_width = (area.width as usize).saturating_sub(4);
    let question_lines = wrap_text(&question.text, text_width);
    let gap: u16 = if density == Density::Compact { 2 } else { 1 };
    let question_height = (question_lines.len() as u16 + 2 + gap).min(area.height);

    let [question_area, options_area] =
        Layout::vertical([Constraint::Length(question_height), Constraint::Min(0)]).areas(area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Question #{}", session.index + 1),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
    ];
    let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    if density == Density::Dense {
        style = style.remove_modifier(Modifier::BOLD).fg(Color::White);
    }
    for l in question_lines {
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(l, style)]));
    }
    f.render_widget(Paragraph::new(lines), question_area);

    draw_options(f, options_area, question, session, density);
}

fn draw_options(
    f: &mut Frame,
    area: Rect,
    question: &Question,
    session: &SessionState,
    density: Density,
) {
    let count = question.options.len();
    if count == 0 || area.width < 8 {
        return;
    }

    let cols = option_columns(area.width, density, count);
    let bordered = density != Density::Dense;
    let inner_left = area.x + 2;
    let usable = area.width.saturating_sub(4);
    let cell_width = (usable.saturating_sub(cols - 1)) / cols;
    // Borders plus the "✓ A. " prefix.
    let chrome = if bordered { 7 } else { 5 };
    let text_width = cell_width.saturating_sub(chrome) as usize;
    let row_gap: u16 = match density {
        Density::Compact => 1,
        _ => 0,
    };

    let rendered: Vec<Vec<String>> = question
        .options
        .iter()
        .map(|o| wrap_text(o, text_width.max(1)))
        .collect();

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (row, chunk) in rendered.chunks(cols as usize).enumerate() {
        let text_rows = chunk.iter().map(|l| l.len()).max().unwrap_or(1) as u16;
        let row_height = text_rows + if bordered { 2 } else { 0 };
        if y >= bottom {
            break;
        }

        for (col, wrapped) in chunk.iter().enumerate() {
            let idx = row * cols as usize + col;
            let rect = Rect::new(
                inner_left + col as u16 * (cell_width + 1),
                y,
                cell_width,
                row_height,
            )
            .intersection(area);
            if rect.is_empty() || !session.revealed.contains(&idx) {
                continue;
            }
            let widget = option_cell(question, idx, wrapped, session.shows_answer(), bordered);
            f.render_widget(widget, rect);
        }

        y = y.saturating_add(row_height + row_gap);
    }
}

fn option_cell(
    question: &Question,
    idx: usize,
    wrapped: &[String],
    show_answer: bool,
    bordered: bool,
) -> Paragraph<'static> {
    let correct = show_answer && question.is_correct(idx);
    let (text_style, border_style) = if correct {
        (
            Style::default().fg(CORRECT).add_modifier(Modifier::BOLD),
            Style::default().fg(CORRECT),
        )
    } else if show_answer {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (Style::default().fg(Color::White), Style::default().fg(Color::Gray))
    };

    let mark = if correct { "✓ " } else { "  " };
    let prefix = format!("{}{}. ", mark, option_label(idx));
    let indent = " ".repeat(prefix.chars().count());

    let lines: Vec<Line<'static>> = wrapped
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let lead = if i == 0 { prefix.clone() } else { indent.clone() };
            Line::from(vec![
                Span::styled(lead, text_style),
                Span::styled(l.clone(), text_style),
            ])
        })
        .collect();

    let mut paragraph = Paragraph::new(lines);
    if bordered {
        paragraph = paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        );
    }
    paragraph
}
