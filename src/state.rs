use crate::density::DensityPolicy;
use crate::model::{Customization, Question};
use crate::sequencer::Sequencer;
use crate::ui::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    ConfirmQuit,
    Help,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// `None` when there is nothing to present (blank screen).
    pub sequencer: Option<Sequencer>,
    pub branding: Customization,
    pub density: DensityPolicy,
    pub dialog_stack: Vec<Dialog>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(sequencer: Option<Sequencer>, branding: Customization, density: DensityPolicy) -> Self {
        Self {
            sequencer,
            branding,
            density,
            dialog_stack: Vec::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        self.sequencer
            .as_ref()
            .map(|s| s.questions())
            .unwrap_or(&[])
    }

    /// Move the presentation clock to `now_ms` since start.
    pub fn advance_to(&mut self, now_ms: u64) {
        if let Some(seq) = self.sequencer.as_mut() {
            seq.advance_to(now_ms);
        }
    }

    pub fn view(&self) -> View<'_> {
        View {
            questions: self.questions(),
            session: self.sequencer.as_ref().map(|s| s.state()),
            branding: &self.branding,
            density: &self.density,
            status: self.status.as_deref(),
            dialog: self.top_dialog(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        if self.top_dialog() != Some(&dialog) {
            self.dialog_stack.push(dialog);
        }
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
