//! Phase timing shared by the live sequencer and the offline exporter.
//!
//! A question's life is a fixed sequence of windows whose lengths depend
//! only on the question and the [`PhasePolicy`]. The sequencer arms its
//! timers from these windows; the exporter samples them frame by frame.

use crate::model::Question;
use crate::policy::{ExplanationMode, PhasePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Options,
    Timer,
    Answer,
    Explanation,
    Transition,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Options => "options",
            Phase::Timer => "timer",
            Phase::Answer => "answer",
            Phase::Explanation => "explanation",
            Phase::Transition => "transition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseWindow {
    pub phase: Phase,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Countdown values after `elapsed_ms` of a `timer_secs` countdown.
/// Returns (percentage remaining, whole seconds remaining).
pub fn countdown(elapsed_ms: u64, timer_secs: u64) -> (f64, u64) {
    let total_ms = timer_secs * 1000;
    if total_ms == 0 || elapsed_ms >= total_ms {
        return (0.0, 0);
    }
    let pct = (100.0 - (elapsed_ms as f64 / total_ms as f64) * 100.0).clamp(0.0, 100.0);
    (pct, timer_secs.saturating_sub(elapsed_ms / 1000))
}

/// State of one question at a point in its timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    /// Options `0..revealed` are visible.
    pub revealed: usize,
    pub progress_pct: f64,
    pub seconds_left: u64,
    pub typed_chars: usize,
    pub halted: bool,
}

/// Timers fire at most once per millisecond, so a zero typing period
/// types one character per millisecond.
pub fn typing_period_floor(mode: ExplanationMode) -> ExplanationMode {
    match mode {
        ExplanationMode::Typed { char_ms, pause_ms } => ExplanationMode::Typed {
            char_ms: char_ms.max(1),
            pause_ms,
        },
        instant => instant,
    }
}

#[derive(Debug, Clone)]
pub struct QuestionTimeline {
    option_count: usize,
    explanation_chars: usize,
    is_last: bool,
    timer_secs: u64,
    tick_ms: u64,
    reveal_ms: u64,
    answer_hold_ms: u64,
    explanation: ExplanationMode,
    transition_ms: u64,
}

impl QuestionTimeline {
    pub fn new(question: &Question, policy: &PhasePolicy, is_last: bool) -> Self {
        Self {
            option_count: question.options.len(),
            explanation_chars: question.explanation_chars(),
            is_last,
            timer_secs: policy.timer_secs,
            tick_ms: policy.tick_ms.max(1),
            reveal_ms: policy.reveal_ms,
            answer_hold_ms: policy.answer_hold_ms,
            explanation: typing_period_floor(policy.explanation),
            transition_ms: policy.transition_ms,
        }
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    /// Offset from question start at which option `idx` appears.
    pub fn reveal_at(&self, idx: usize) -> u64 {
        (idx as u64 + 1) * self.reveal_ms
    }

    pub fn options_ms(&self) -> u64 {
        self.option_count as u64 * self.reveal_ms
    }

    /// Countdown length rounded up to whole ticks, since the phase ends on
    /// the first tick at or past the configured duration.
    pub fn timer_ms(&self) -> u64 {
        let total = self.timer_secs * 1000;
        total.div_ceil(self.tick_ms) * self.tick_ms
    }

    pub fn answer_ms(&self) -> u64 {
        self.answer_hold_ms
    }

    pub fn has_explanation(&self) -> bool {
        self.explanation_chars > 0
    }

    /// Time until the explanation text is fully on screen.
    pub fn typing_ms(&self) -> u64 {
        match self.explanation {
            ExplanationMode::Typed { char_ms, .. } if self.has_explanation() => {
                self.explanation_chars as u64 * char_ms
            }
            _ => 0,
        }
    }

    pub fn explanation_ms(&self) -> u64 {
        if !self.has_explanation() {
            return 0;
        }
        match self.explanation {
            ExplanationMode::Instant { hold_ms } => hold_ms,
            ExplanationMode::Typed { pause_ms, .. } => self.typing_ms() + pause_ms,
        }
    }

    pub fn transition_ms(&self) -> u64 {
        if self.is_last {
            0
        } else {
            self.transition_ms
        }
    }

    pub fn windows(&self) -> Vec<PhaseWindow> {
        let spans = [
            (Phase::Options, self.options_ms()),
            (Phase::Timer, self.timer_ms()),
            (Phase::Answer, self.answer_ms()),
            (Phase::Explanation, self.explanation_ms()),
            (Phase::Transition, self.transition_ms()),
        ];

        let mut windows = Vec::new();
        let mut start = 0;
        for (phase, len) in spans {
            if phase == Phase::Explanation && !self.has_explanation() {
                continue;
            }
            if phase == Phase::Transition && len == 0 {
                continue;
            }
            windows.push(PhaseWindow {
                phase,
                start_ms: start,
                end_ms: start + len,
            });
            start += len;
        }
        windows
    }

    /// Time from question start until the next question starts, or for the
    /// last question, until the presentation halts.
    pub fn duration_ms(&self) -> u64 {
        self.windows().last().map(|w| w.end_ms).unwrap_or(0)
    }

    pub fn sample(&self, elapsed_ms: u64) -> Snapshot {
        let windows = self.windows();
        let current = windows
            .iter()
            .find(|w| elapsed_ms >= w.start_ms && elapsed_ms < w.end_ms);

        let (window, halted) = match current {
            Some(w) => (*w, false),
            None => {
                // Past the end: the last question freezes on its final phase.
                let last = windows
                    .iter()
                    .rev()
                    .find(|w| w.phase != Phase::Transition)
                    .copied()
                    .unwrap_or(PhaseWindow {
                        phase: Phase::Answer,
                        start_ms: 0,
                        end_ms: 0,
                    });
                (last, true)
            }
        };

        let local = if halted {
            window.end_ms - window.start_ms
        } else {
            elapsed_ms - window.start_ms
        };

        let mut snap = Snapshot {
            phase: window.phase,
            revealed: self.option_count,
            progress_pct: 0.0,
            seconds_left: 0,
            typed_chars: 0,
            halted,
        };

        match window.phase {
            Phase::Options => {
                snap.revealed = if self.reveal_ms == 0 {
                    self.option_count
                } else {
                    ((local / self.reveal_ms) as usize).min(self.option_count)
                };
                snap.progress_pct = 100.0;
                snap.seconds_left = self.timer_secs;
            }
            Phase::Timer => {
                let ticked = local / self.tick_ms * self.tick_ms;
                let (pct, secs) = countdown(ticked, self.timer_secs);
                snap.progress_pct = pct;
                snap.seconds_left = secs;
            }
            Phase::Answer => {}
            Phase::Transition => snap.typed_chars = self.explanation_chars,
            Phase::Explanation => {
                snap.typed_chars = match self.explanation {
                    ExplanationMode::Instant { .. } => self.explanation_chars,
                    ExplanationMode::Typed { char_ms, .. } => {
                        ((local / char_ms) as usize).min(self.explanation_chars)
                    }
                };
            }
        }

        snap
    }
}

/// Timeline of a whole quiz: questions laid end to end.
#[derive(Debug, Clone)]
pub struct QuizTimeline {
    questions: Vec<QuestionTimeline>,
    offsets: Vec<u64>,
    total_ms: u64,
}

impl QuizTimeline {
    pub fn new(questions: &[Question], policy: &PhasePolicy) -> Self {
        let mut timelines = Vec::with_capacity(questions.len());
        let mut offsets = Vec::with_capacity(questions.len());
        let mut start = 0;
        for (i, q) in questions.iter().enumerate() {
            let tl = QuestionTimeline::new(q, policy, i + 1 == questions.len());
            offsets.push(start);
            start += tl.duration_ms();
            timelines.push(tl);
        }

        Self {
            questions: timelines,
            offsets,
            total_ms: start,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn question(&self, idx: usize) -> Option<&QuestionTimeline> {
        self.questions.get(idx)
    }

    pub fn start_of(&self, idx: usize) -> Option<u64> {
        self.offsets.get(idx).copied()
    }

    /// Question index and its snapshot at `at_ms` from the start of the quiz.
    pub fn sample(&self, at_ms: u64) -> Option<(usize, Snapshot)> {
        if self.questions.is_empty() {
            return None;
        }
        let idx = self
            .offsets
            .partition_point(|&start| start <= at_ms)
            .saturating_sub(1);
        let local = at_ms - self.offsets[idx];
        Some((idx, self.questions[idx].sample(local)))
    }

    /// Number of frames needed to cover the quiz at `fps`, including the
    /// final frame on the halted state.
    pub fn frame_count(&self, fps: u32) -> u64 {
        (self.total_ms * fps as u64).div_ceil(1000) + 1
    }
}
