use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use quizreel::cli::Cli;
use quizreel::config;
use quizreel::defaults::default_questions;
use quizreel::model::{AnswerKey, Customization};
use quizreel::persist;
use quizreel::policy::{ExplanationMode, OnEmpty, PhasePolicy, Preset};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quizreel-test-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_branding_save_load_clear() {
    let dir = scratch_dir("branding");
    let path = dir.join("nested").join("branding.yaml");
    assert_eq!(persist::load_branding(&path).unwrap(), None);

    let branding = Customization {
        promotion_link: Some("https://example.org/join".to_string()),
        quiz_title: Some("Friday Quiz".to_string()),
        footer_text: None,
        social_proof: Some("Played by 500 teams".to_string()),
    };
    persist::save_branding(&branding, &path).unwrap();
    assert_eq!(persist::load_branding(&path).unwrap(), Some(branding));

    let yaml = fs::read_to_string(&path).unwrap();
    assert!(!yaml.contains("footer_text"));

    persist::clear_branding(&path).unwrap();
    assert!(!path.exists());
    persist::clear_branding(&path).unwrap();

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_branding_is_reported() {
    let dir = scratch_dir("corrupt");
    let path = dir.join("branding.yaml");
    fs::write(&path, "quiz_title: [unclosed").unwrap();
    let err = persist::load_branding(&path).unwrap_err();
    assert!(err.contains("--clear-branding"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_flags_override_saved_branding() {
    let dir = scratch_dir("overlay");
    let path = dir.join("branding.yaml");
    let saved = Customization {
        quiz_title: Some("Saved Title".to_string()),
        footer_text: Some("Saved footer".to_string()),
        ..Customization::default()
    };
    persist::save_branding(&saved, &path).unwrap();

    let cli = Cli::parse_from(["quizreel", "--title", "Tonight", "--save-branding"]);
    let branding = config::resolve_branding(&cli, Some(&path)).unwrap();
    assert_eq!(branding.title(), "Tonight");
    assert_eq!(branding.footer_text.as_deref(), Some("Saved footer"));

    let stored = persist::load_branding(&path).unwrap().unwrap();
    assert_eq!(stored.quiz_title.as_deref(), Some("Tonight"));

    let cli = Cli::parse_from(["quizreel", "--clear-branding"]);
    let branding = config::resolve_branding(&cli, Some(&path)).unwrap();
    assert!(branding.is_empty());
    assert_eq!(branding.title(), "Quiz");
    assert!(!path.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_save_without_config_dir_fails() {
    let cli = Cli::parse_from(["quizreel", "--save-branding"]);
    assert!(config::resolve_branding(&cli, None).is_err());
}

#[test]
fn test_fingerprint_tracks_content() {
    let questions = default_questions();
    let a = persist::quiz_fingerprint(&questions);
    assert!(a.starts_with("sha256:"));
    assert_eq!(a.len(), "sha256:".len() + 64);
    assert_eq!(a, persist::quiz_fingerprint(&default_questions()));

    let mut changed = default_questions();
    changed[0].answer = AnswerKey::Single("Block storage".to_string());
    assert_ne!(a, persist::quiz_fingerprint(&changed));
}

#[test]
fn test_policy_presets() {
    let classic = PhasePolicy::preset(Preset::Classic);
    assert_eq!(classic.timer_secs, 10);
    assert_eq!(classic.reveal_ms, 700);
    assert_eq!(classic.answer_hold_ms, 2000);
    assert_eq!(
        classic.explanation,
        ExplanationMode::Typed {
            char_ms: 50,
            pause_ms: 3000
        }
    );
    assert_eq!(classic.transition_ms, 0);

    let quick = PhasePolicy::preset(Preset::Quick);
    assert_eq!(quick.timer_secs, 5);
    assert_eq!(quick.transition_ms, 1000);

    let marathon = PhasePolicy::preset(Preset::Marathon);
    assert_eq!(marathon.timer_secs, 25);
    assert_eq!(marathon.reveal_ms, 800);
    assert_eq!(marathon.answer_hold_ms, 3000);
}

#[test]
fn test_config_file_then_flags() {
    let cli = Cli::parse_from([
        "quizreel",
        "--preset",
        "marathon",
        "--config",
        "fixtures/timing.yaml",
        "--reveal-ms",
        "400",
        "--on-empty",
        "blank",
    ]);
    let policy = config::resolve_policy(&cli).unwrap();

    // From the file
    assert_eq!(policy.timer_secs, 3);
    assert_eq!(policy.explanation, ExplanationMode::Instant { hold_ms: 1500 });
    assert_eq!(policy.density.dense_total_above, 300);
    assert_eq!(policy.density.compact_total_below, 150);
    // From the preset
    assert_eq!(policy.answer_hold_ms, 3000);
    // From flags
    assert_eq!(policy.reveal_ms, 400);
    assert_eq!(policy.on_empty, OnEmpty::Blank);
}

#[test]
fn test_explanation_mode_flags() {
    let cli = Cli::parse_from(["quizreel", "--instant"]);
    let policy = config::resolve_policy(&cli).unwrap();
    assert_eq!(policy.explanation, ExplanationMode::Instant { hold_ms: 4000 });

    let cli = Cli::parse_from(["quizreel", "--preset", "quick", "--typed"]);
    let policy = config::resolve_policy(&cli).unwrap();
    assert_eq!(
        policy.explanation,
        ExplanationMode::Typed {
            char_ms: 50,
            pause_ms: 3000
        }
    );

    assert!(Cli::try_parse_from(["quizreel", "--instant", "--typed"]).is_err());
}

#[test]
fn test_invalid_config_is_rejected() {
    let base = PhasePolicy::default();
    assert!(base.overlay_yaml("tick_ms: 0").is_err());
    assert!(base.overlay_yaml("- not a mapping").is_err());
    assert!(base
        .overlay_yaml("explanation:\n  mode: typed\n  char_ms: 0\n")
        .is_err());
    assert_eq!(base.overlay_yaml("").unwrap(), base);
}

#[test]
fn test_typed_config_keeps_unspecified_fields() {
    let base = PhasePolicy::default();
    let policy = base
        .overlay_yaml("explanation:\n  pause_ms: 500\n")
        .unwrap();
    assert_eq!(
        policy.explanation,
        ExplanationMode::Typed {
            char_ms: 50,
            pause_ms: 500
        }
    );
}

#[test]
fn test_missing_config_file() {
    let err = PhasePolicy::default()
        .overlay_file(Path::new("fixtures/nope.yaml"))
        .unwrap_err();
    assert!(err.contains("nope.yaml"));
}
