pub mod countdown;
pub mod dialog;
pub mod explanation;
pub mod keybar;
pub mod layout;
pub mod question;
pub mod sidebar;
pub mod titlebar;
pub mod transition;
pub mod wrap;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::density::DensityPolicy;
use crate::model::{Customization, Question};
use crate::sequencer::SessionState;
use crate::state::Dialog;
use crate::timeline::Phase;

/// Everything a frame depends on. Drawing is a pure function of this, so the
/// live app and the exporter render identical screens.
pub struct View<'a> {
    pub questions: &'a [Question],
    pub session: Option<&'a SessionState>,
    pub branding: &'a Customization,
    pub density: &'a DensityPolicy,
    pub status: Option<&'a str>,
    pub dialog: Option<&'a Dialog>,
}

/// Share of the quiz reached at question `index`, rounded to whole percent.
pub fn completion_pct(index: usize, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    (((index + 1) as f64 / total as f64) * 100.0).round().min(100.0) as u16
}

pub fn draw(f: &mut Frame, view: &View) {
    let area = f.area();

    match view.session {
        Some(session) if session.index < view.questions.len() => {
            let question = &view.questions[session.index];
            match session.phase {
                Phase::Transition => {
                    transition::draw_transition(f, area, session.index, view.questions.len())
                }
                Phase::Explanation => {
                    explanation::draw_explanation(f, area, view, question, session)
                }
                _ => draw_presenting(f, area, view, question, session),
            }
        }
        _ => transition::draw_blank(f, area),
    }

    if let Some(dialog) = view.dialog {
        dialog::draw_dialog(f, area, dialog);
    }
}

fn draw_presenting(
    f: &mut Frame,
    area: Rect,
    view: &View,
    question: &Question,
    session: &SessionState,
) {
    let density = view.density.classify(question);
    let layout = layout::compute_layout(area, density);

    titlebar::draw_titlebar(f, layout.titlebar, view);
    countdown::draw_countdown(f, layout.countdown, session);
    question::draw_question(f, layout.main, question, session, density);
    sidebar::draw_sidebar(f, layout.sidebar, view, session.index);
    keybar::draw_footer(f, layout.footer, view);
    keybar::draw_keybar(f, layout.keybar, view);
}
