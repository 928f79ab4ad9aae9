use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;
use ratatui::Terminal;

use quizreel::density::DensityPolicy;
use quizreel::model::{Customization, Question};
use quizreel::policy::PhasePolicy;
use quizreel::sequencer::{SessionState, Sequencer};
use quizreel::state::{AppState, Dialog};
use quizreel::timeline::Phase;
use quizreel::tui::handle_key;
use quizreel::ui::countdown::countdown_color;
use quizreel::ui::wrap::wrap_text;
use quizreel::ui::{self, completion_pct, View};

fn render(view: &View) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| ui::draw(f, view)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn paris() -> Vec<Question> {
    vec![
        Question::new("What is the capital of France?", &["Paris", "London"], "Paris")
            .with_explanation("Paris has been the French capital for centuries."),
        Question::new("Second question?", &["Yes", "No"], "Yes"),
    ]
}

fn session(phase: Phase, revealed: usize) -> SessionState {
    let mut s = SessionState::fresh(0, 10);
    s.phase = phase;
    s.revealed = (0..revealed).collect();
    s
}

fn view<'a>(
    questions: &'a [Question],
    session: &'a SessionState,
    branding: &'a Customization,
    density: &'a DensityPolicy,
) -> View<'a> {
    View {
        questions,
        session: Some(session),
        branding,
        density,
        status: None,
        dialog: None,
    }
}

#[test]
fn test_options_hidden_until_revealed() {
    let questions = paris();
    let branding = Customization::default();
    let density = DensityPolicy::default();

    let s = session(Phase::Options, 1);
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(text.contains("What is the capital of France?"));
    assert!(text.contains("A. Paris"));
    assert!(!text.contains("London"));
    assert!(text.contains("Question 1 of 2"));
}

#[test]
fn test_answer_phase_marks_correct_option() {
    let questions = paris();
    let branding = Customization::default();
    let density = DensityPolicy::default();

    let s = session(Phase::Timer, 2);
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(!text.contains("✓"));

    let s = session(Phase::Answer, 2);
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(text.contains("✓ A. Paris"));
    assert!(!text.contains("✓ B. London"));
    assert!(text.contains("B. London"));
}

#[test]
fn test_explanation_screen_typing_and_progress() {
    let questions = paris();
    let branding = Customization::default();
    let density = DensityPolicy::default();

    let mut s = session(Phase::Explanation, 2);
    s.explanation_buffer = "Paris has".to_string();
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(text.contains("Explanation"));
    assert!(text.contains("Paris has▌"));
    assert!(text.contains("Reading explanation..."));
    assert!(text.contains("Question 1 of 2 • 50% Complete"));

    s.explanation_buffer = questions[0].explanation_text().to_string();
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(text.contains("Moving to next question..."));
    assert!(!text.contains("▌"));
}

#[test]
fn test_transition_and_blank_screens() {
    let questions = paris();
    let branding = Customization::default();
    let density = DensityPolicy::default();

    let s = session(Phase::Transition, 2);
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(text.contains("Next question loading..."));
    assert!(text.contains("Question 2 of 2"));

    let empty = View {
        questions: &[],
        session: None,
        branding: &branding,
        density: &density,
        status: None,
        dialog: None,
    };
    assert!(screen_text(&render(&empty)).contains("No questions found"));
}

#[test]
fn test_branding_is_rendered() {
    let questions = paris();
    let branding = Customization {
        promotion_link: Some("example.org/join".to_string()),
        quiz_title: Some("Geography Night".to_string()),
        footer_text: Some("Thanks for playing".to_string()),
        social_proof: Some("1200 players".to_string()),
    };
    let density = DensityPolicy::default();
    let s = session(Phase::Options, 0);
    let text = screen_text(&render(&view(&questions, &s, &branding, &density)));
    assert!(text.contains("Geography Night"));
    assert!(text.contains("example.org/join"));
    assert!(text.contains("Thanks for playing"));
    assert!(text.contains("1200 players"));
}

#[test]
fn test_countdown_colour_threshold() {
    assert_eq!(countdown_color(100.0), countdown_color(31.0));
    assert_ne!(countdown_color(31.0), countdown_color(30.0));
    assert_eq!(countdown_color(30.0), Color::Rgb(247, 200, 115));
    assert_eq!(countdown_color(0.0), Color::Rgb(247, 200, 115));
}

#[test]
fn test_completion_percentage() {
    assert_eq!(completion_pct(0, 4), 25);
    assert_eq!(completion_pct(2, 3), 100);
    assert_eq!(completion_pct(0, 3), 33);
    assert_eq!(completion_pct(0, 0), 0);
}

#[test]
fn test_wrap_text() {
    assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
    assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap_text("", 10), vec![String::new()]);
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn app() -> AppState {
    let seq = Sequencer::new(paris(), PhasePolicy::default());
    AppState::new(seq, Customization::default(), DensityPolicy::default())
}

#[test]
fn test_quit_asks_for_confirmation() {
    let mut state = app();
    handle_key(key(KeyCode::Char('q')), &mut state);
    assert_eq!(state.top_dialog(), Some(&Dialog::ConfirmQuit));
    assert!(!state.should_quit);

    handle_key(key(KeyCode::Esc), &mut state);
    assert!(!state.has_dialog());
    assert!(!state.should_quit);

    handle_key(key(KeyCode::Esc), &mut state);
    handle_key(key(KeyCode::Enter), &mut state);
    assert!(state.should_quit);
}

#[test]
fn test_ctrl_c_quits_and_help_toggles() {
    let mut state = app();
    handle_key(key(KeyCode::Char('?')), &mut state);
    assert_eq!(state.top_dialog(), Some(&Dialog::Help));
    handle_key(key(KeyCode::Char('?')), &mut state);
    assert!(!state.has_dialog());

    handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert!(state.should_quit);
}

#[test]
fn test_keys_do_not_move_the_presentation() {
    let mut state = app();
    for code in [KeyCode::Right, KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('n')] {
        handle_key(key(code), &mut state);
    }
    let seq = state.sequencer.as_ref().unwrap();
    assert_eq!(seq.state().index, 0);
    assert_eq!(seq.state().phase, Phase::Options);
    assert!(seq.state().revealed.is_empty());
}
