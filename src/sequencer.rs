use std::collections::BTreeSet;

use crate::model::Question;
use crate::policy::{ExplanationMode, PhasePolicy};
use crate::scheduler::{Scheduler, TimerId};
use crate::timeline::{countdown, typing_period_floor, Phase, QuestionTimeline, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqEvent {
    Reveal(usize),
    Tick,
    AnswerHeld,
    TypeChar,
    ExplanationDone,
    TransitionDone,
}

/// What the presentation shows for the current question.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub index: usize,
    pub phase: Phase,
    pub revealed: BTreeSet<usize>,
    pub seconds_left: u64,
    pub progress_pct: f64,
    pub explanation_buffer: String,
    pub halted: bool,
}

impl SessionState {
    pub fn fresh(index: usize, timer_secs: u64) -> Self {
        Self {
            index,
            phase: Phase::Options,
            revealed: BTreeSet::new(),
            seconds_left: timer_secs,
            progress_pct: 100.0,
            explanation_buffer: String::new(),
            halted: false,
        }
    }

    /// Rebuild the displayed state from a timeline sample.
    pub fn from_snapshot(index: usize, snap: &Snapshot, question: &Question) -> Self {
        Self {
            index,
            phase: snap.phase,
            revealed: (0..snap.revealed).collect(),
            seconds_left: snap.seconds_left,
            progress_pct: snap.progress_pct,
            explanation_buffer: question
                .explanation_text()
                .chars()
                .take(snap.typed_chars)
                .collect(),
            halted: snap.halted,
        }
    }

    pub fn shows_answer(&self) -> bool {
        matches!(self.phase, Phase::Answer | Phase::Explanation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Reveal { index: usize, option: usize },
    Entered { index: usize, phase: Phase },
    Halted { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Journaled {
    pub at_ms: u64,
    pub record: Record,
}

/// Drives questions through their phases on timers.
///
/// The only inputs are the passage of time (`advance_to`) and dropping the
/// sequencer. There is no way to skip ahead.
#[derive(Debug, Clone)]
pub struct Sequencer {
    questions: Vec<Question>,
    policy: PhasePolicy,
    scheduler: Scheduler<SeqEvent>,
    state: SessionState,
    timeline: QuestionTimeline,
    timer_elapsed_ms: u64,
    tick_timer: Option<TimerId>,
    typing_timer: Option<TimerId>,
    journal: Vec<Journaled>,
}

impl Sequencer {
    /// Returns `None` when there is nothing to present.
    pub fn new(questions: Vec<Question>, policy: PhasePolicy) -> Option<Self> {
        let first = questions.first()?;
        let timeline = QuestionTimeline::new(first, &policy, questions.len() == 1);
        let state = SessionState::fresh(0, policy.timer_secs);

        let mut seq = Self {
            questions,
            policy,
            scheduler: Scheduler::new(),
            state,
            timeline,
            timer_elapsed_ms: 0,
            tick_timer: None,
            typing_timer: None,
            journal: Vec::new(),
        };
        seq.enter_question(0);
        Some(seq)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.state.index]
    }

    pub fn policy(&self) -> &PhasePolicy {
        &self.policy
    }

    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn live_timers(&self) -> usize {
        self.scheduler.live()
    }

    pub fn stale_timers(&self) -> usize {
        self.scheduler.stale()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn journal(&self) -> &[Journaled] {
        &self.journal
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    /// Fire every timer due up to `now_ms`, in order.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            if fired.epoch != self.scheduler.epoch() {
                tracing::warn!(event = ?fired.event, "dropping timer from a previous question");
                continue;
            }
            self.handle(fired.event);
        }
        self.scheduler.advance_clock(now_ms);
    }

    fn record(&mut self, record: Record) {
        self.journal.push(Journaled {
            at_ms: self.scheduler.now(),
            record,
        });
    }

    fn handle(&mut self, event: SeqEvent) {
        match event {
            SeqEvent::Reveal(option) => {
                if self.state.phase != Phase::Options {
                    return;
                }
                self.state.revealed.insert(option);
                self.record(Record::Reveal {
                    index: self.state.index,
                    option,
                });
                self.check_all_revealed();
            }
            SeqEvent::Tick => self.on_tick(),
            SeqEvent::AnswerHeld => {
                if self.timeline.has_explanation() {
                    self.enter_explanation();
                } else {
                    self.advance_question();
                }
            }
            SeqEvent::TypeChar => self.on_type_char(),
            SeqEvent::ExplanationDone => self.advance_question(),
            SeqEvent::TransitionDone => self.enter_question(self.state.index + 1),
        }
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        tracing::debug!(
            question = self.state.index + 1,
            phase = phase.name(),
            at_ms = self.scheduler.now(),
            "phase"
        );
        self.record(Record::Entered {
            index: self.state.index,
            phase,
        });
    }

    fn enter_question(&mut self, index: usize) {
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "cleared timers of previous question");
        }
        self.tick_timer = None;
        self.typing_timer = None;
        self.timer_elapsed_ms = 0;

        let is_last = index + 1 == self.questions.len();
        self.timeline = QuestionTimeline::new(&self.questions[index], &self.policy, is_last);
        self.state = SessionState::fresh(index, self.policy.timer_secs);
        tracing::info!(
            question = index + 1,
            total = self.questions.len(),
            "presenting question"
        );

        self.enter_phase(Phase::Options);
        for option in 0..self.timeline.option_count() {
            let due = self.timeline.reveal_at(option);
            self.scheduler.set_timeout(due, SeqEvent::Reveal(option));
        }
        self.check_all_revealed();
    }

    fn check_all_revealed(&mut self) {
        if self.state.phase == Phase::Options
            && self.state.revealed.len() == self.timeline.option_count()
        {
            self.enter_timer();
        }
    }

    fn enter_timer(&mut self) {
        self.enter_phase(Phase::Timer);
        self.timer_elapsed_ms = 0;
        self.state.progress_pct = 100.0;
        self.state.seconds_left = self.policy.timer_secs;
        if self.timeline.timer_ms() == 0 {
            self.finish_timer();
        } else {
            self.tick_timer = Some(
                self.scheduler
                    .set_interval(self.policy.tick_ms, SeqEvent::Tick),
            );
        }
    }

    fn on_tick(&mut self) {
        if self.state.phase != Phase::Timer {
            return;
        }
        self.timer_elapsed_ms += self.policy.tick_ms.max(1);
        let (pct, secs) = countdown(self.timer_elapsed_ms, self.policy.timer_secs);
        self.state.progress_pct = pct;
        self.state.seconds_left = secs;
        if self.timer_elapsed_ms >= self.policy.timer_ms() {
            self.finish_timer();
        }
    }

    fn finish_timer(&mut self) {
        if let Some(id) = self.tick_timer.take() {
            self.scheduler.clear(id);
        }
        self.state.progress_pct = 0.0;
        self.state.seconds_left = 0;
        self.enter_phase(Phase::Answer);
        self.scheduler
            .set_timeout(self.policy.answer_hold_ms, SeqEvent::AnswerHeld);
    }

    fn enter_explanation(&mut self) {
        self.enter_phase(Phase::Explanation);
        match typing_period_floor(self.policy.explanation) {
            ExplanationMode::Instant { hold_ms } => {
                self.state.explanation_buffer = self.current_question().explanation_text().to_string();
                self.scheduler
                    .set_timeout(hold_ms, SeqEvent::ExplanationDone);
            }
            ExplanationMode::Typed { char_ms, .. } => {
                self.state.explanation_buffer.clear();
                self.typing_timer = Some(self.scheduler.set_interval(char_ms, SeqEvent::TypeChar));
            }
        }
    }

    fn on_type_char(&mut self) {
        if self.state.phase != Phase::Explanation {
            return;
        }
        let typed = self.state.explanation_buffer.chars().count();
        let next = self
            .current_question()
            .explanation_text()
            .chars()
            .nth(typed);
        if let Some(c) = next {
            self.state.explanation_buffer.push(c);
        }

        let total = self.current_question().explanation_chars();
        if self.state.explanation_buffer.chars().count() >= total {
            if let Some(id) = self.typing_timer.take() {
                self.scheduler.clear(id);
            }
            let pause_ms = match self.policy.explanation {
                ExplanationMode::Typed { pause_ms, .. } => pause_ms,
                ExplanationMode::Instant { hold_ms } => hold_ms,
            };
            self.scheduler
                .set_timeout(pause_ms, SeqEvent::ExplanationDone);
        }
    }

    fn advance_question(&mut self) {
        let index = self.state.index;
        if index + 1 >= self.questions.len() {
            self.state.halted = true;
            tracing::info!(question = index + 1, "reached end of quiz");
            self.record(Record::Halted { index });
            return;
        }

        if self.timeline.transition_ms() > 0 {
            self.enter_phase(Phase::Transition);
            self.scheduler
                .set_timeout(self.timeline.transition_ms(), SeqEvent::TransitionDone);
        } else {
            self.enter_question(index + 1);
        }
    }
}
