use quizreel::defaults::default_questions;
use quizreel::density::{ContentMetrics, Density, DensityPolicy};
use quizreel::model::Question;
use quizreel::policy::{ExplanationMode, PhasePolicy, Preset};
use quizreel::sequencer::{SessionState, Sequencer};
use quizreel::timeline::{countdown, Phase, QuestionTimeline, QuizTimeline};

fn assert_sequencer_matches_timeline(questions: Vec<Question>, policy: PhasePolicy, step_ms: u64) {
    let timeline = QuizTimeline::new(&questions, &policy);
    let mut seq = Sequencer::new(questions.clone(), policy).unwrap();

    let mut at = 0;
    while at <= timeline.total_ms() + 2000 {
        seq.advance_to(at);
        let (index, snap) = timeline.sample(at).unwrap();
        let expected = SessionState::from_snapshot(index, &snap, &questions[index]);
        assert_eq!(seq.state(), &expected, "diverged at {}ms", at);
        at += step_ms;
    }
}

#[test]
fn test_sequencer_agrees_with_timeline_classic() {
    assert_sequencer_matches_timeline(default_questions(), PhasePolicy::default(), 10);
}

#[test]
fn test_sequencer_agrees_with_timeline_quick() {
    assert_sequencer_matches_timeline(default_questions(), PhasePolicy::preset(Preset::Quick), 10);
}

#[test]
fn test_sequencer_agrees_with_timeline_marathon_odd_steps() {
    assert_sequencer_matches_timeline(
        default_questions(),
        PhasePolicy::preset(Preset::Marathon),
        37,
    );
}

#[test]
fn test_sequencer_agrees_with_timeline_zero_typing_period() {
    let mut policy = PhasePolicy::default();
    policy.timer_secs = 1;
    policy.tick_ms = 0;
    policy.explanation = ExplanationMode::Typed {
        char_ms: 0,
        pause_ms: 500,
    };
    let questions = vec![
        Question::new("Q1", &["A", "B"], "A").with_explanation("twenty characters ok"),
        Question::new("Q2", &["A", "B"], "B").with_explanation("short"),
    ];

    let tl = QuestionTimeline::new(&questions[0], &policy, false);
    assert_eq!(tl.typing_ms(), 20);
    assert_sequencer_matches_timeline(questions, policy, 1);
}

#[test]
fn test_question_windows() {
    let policy = PhasePolicy::default();
    let q = Question::new("Q?", &["A", "B", "C"], "A").with_explanation("0123456789");
    let tl = QuestionTimeline::new(&q, &policy, false);

    let phases: Vec<(Phase, u64, u64)> = tl
        .windows()
        .iter()
        .map(|w| (w.phase, w.start_ms, w.end_ms))
        .collect();
    assert_eq!(
        phases,
        vec![
            (Phase::Options, 0, 2100),
            (Phase::Timer, 2100, 12_100),
            (Phase::Answer, 12_100, 14_100),
            (Phase::Explanation, 14_100, 14_100 + 500 + 3000),
        ]
    );
    assert_eq!(tl.duration_ms(), 17_600);
}

#[test]
fn test_windows_skip_missing_explanation() {
    let policy = PhasePolicy::preset(Preset::Quick);
    let q = Question::new("Q?", &["A", "B"], "A");
    let tl = QuestionTimeline::new(&q, &policy, false);
    let phases: Vec<Phase> = tl.windows().iter().map(|w| w.phase).collect();
    assert_eq!(phases, vec![Phase::Options, Phase::Timer, Phase::Answer, Phase::Transition]);

    // The last question has no transition
    let last = QuestionTimeline::new(&q, &policy, true);
    assert_eq!(last.transition_ms(), 0);
    assert_eq!(last.windows().last().map(|w| w.phase), Some(Phase::Answer));
}

#[test]
fn test_sample_after_end_is_halted() {
    let questions = vec![Question::new("Q1", &["A", "B"], "A")];
    let timeline = QuizTimeline::new(&questions, &PhasePolicy::default());
    assert_eq!(timeline.total_ms(), 13_400);

    let (index, snap) = timeline.sample(13_399).unwrap();
    assert_eq!(index, 0);
    assert!(!snap.halted);

    let (index, snap) = timeline.sample(50_000).unwrap();
    assert_eq!(index, 0);
    assert!(snap.halted);
    assert_eq!(snap.phase, Phase::Answer);
}

#[test]
fn test_frame_count_covers_final_frame() {
    let questions = vec![Question::new("Q1", &["A", "B"], "A")];
    let timeline = QuizTimeline::new(&questions, &PhasePolicy::default());
    assert_eq!(timeline.frame_count(30), 13_400 * 30 / 1000 + 1);
    assert_eq!(timeline.start_of(0), Some(0));
    assert!(QuizTimeline::new(&[], &PhasePolicy::default()).sample(0).is_none());
}

#[test]
fn test_countdown_bounds() {
    assert_eq!(countdown(0, 10), (100.0, 10));
    assert_eq!(countdown(999, 10).1, 10);
    assert_eq!(countdown(1000, 10).1, 9);
    assert_eq!(countdown(9999, 10).1, 1);
    assert_eq!(countdown(10_000, 10), (0.0, 0));
    assert_eq!(countdown(25_000, 10), (0.0, 0));
    assert_eq!(countdown(0, 0), (0.0, 0));
}

#[test]
fn test_density_classification() {
    let policy = DensityPolicy::default();

    let short = Question::new("2 + 2?", &["3", "4", "5", "22"], "4");
    assert_eq!(policy.classify(&short), Density::Compact);

    let medium = Question::new(
        "Which command lists the files in the current directory?",
        &[
            "ls lists directory contents",
            "cd changes the directory",
            "rm removes a file",
            "mv moves a file elsewhere",
        ],
        "ls lists directory contents",
    );
    assert_eq!(policy.classify(&medium), Density::Medium);

    let long_option = "a".repeat(81);
    let dense = Question::new("Q?", &[long_option.as_str(), "b"], "b");
    assert_eq!(policy.classify(&dense), Density::Dense);

    let long_question = "q".repeat(201);
    let dense = Question::new(&long_question, &["a", "b"], "a");
    assert_eq!(policy.classify(&dense), Density::Dense);
}

#[test]
fn test_density_without_options_does_not_divide_by_zero() {
    let q = Question::new("Open question", &[], "");
    let metrics = ContentMetrics::of(&q);
    assert_eq!(metrics.average_option_len, 0.0);
    assert_eq!(DensityPolicy::default().classify(&q), Density::Compact);
}

#[test]
fn test_explanation_density() {
    let policy = DensityPolicy::default();
    assert_eq!(policy.classify_explanation(&"x".repeat(99)), Density::Compact);
    assert_eq!(policy.classify_explanation(&"x".repeat(100)), Density::Medium);
    assert_eq!(policy.classify_explanation(&"x".repeat(300)), Density::Medium);
    assert_eq!(policy.classify_explanation(&"x".repeat(301)), Density::Dense);
}
