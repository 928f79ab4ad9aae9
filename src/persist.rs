use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

use crate::model::{Customization, Question};
use crate::policy::{ExplanationMode, PhasePolicy};
use crate::timeline::QuizTimeline;
use crate::ticker::format_clock;

/// Where saved branding lives: `<config dir>/quizreel/branding.yaml`.
pub fn branding_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quizreel").map(|dirs| dirs.config_dir().join("branding.yaml"))
}

pub fn load_branding(path: &Path) -> Result<Option<Customization>, String> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let branding: Customization = serde_yaml::from_str(&content).map_err(|e| {
        format!(
            "Corrupt branding file {}: {} (use --clear-branding to reset)",
            path.display(),
            e
        )
    })?;
    Ok(Some(branding))
}

pub fn save_branding(branding: &Customization, path: &Path) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create config dir {}: {}", dir.display(), e))?;
    }
    let yaml = serde_yaml::to_string(branding)
        .map_err(|e| format!("Cannot encode branding: {}", e))?;
    atomic_write(path, &yaml)
}

pub fn clear_branding(path: &Path) -> Result<(), String> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| format!("Cannot clear branding: {}", e))?;
    }
    Ok(())
}

fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| format!("Cannot write {}: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Cannot rename: {}", e))?;
    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Content hash of the quiz as presented, independent of the file format.
pub fn quiz_fingerprint(questions: &[Question]) -> String {
    let mut hasher = Sha256::new();
    for q in questions {
        hasher.update(q.text.as_bytes());
        hasher.update([0u8]);
        for opt in &q.options {
            hasher.update(opt.as_bytes());
            hasher.update([0u8]);
        }
        for a in q.answer.values() {
            hasher.update(a.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(q.explanation_text().as_bytes());
        hasher.update([1u8]);
    }
    format!("sha256:{}", hex_encode(&hasher.finalize()))
}

pub fn print_summary(questions: &[Question], policy: &PhasePolicy, source: &str) {
    let timeline = QuizTimeline::new(questions, policy);
    let explained = questions.iter().filter(|q| q.has_explanation()).count();
    println!("Quiz: {}", source);
    println!("Questions: {} ({} with explanation)", questions.len(), explained);
    println!("Fingerprint: {}", quiz_fingerprint(questions));
    let mode = match policy.explanation {
        ExplanationMode::Instant { hold_ms } => format!("instant, {}ms hold", hold_ms),
        ExplanationMode::Typed { char_ms, pause_ms } => {
            format!("typed, {}ms/char, {}ms pause", char_ms, pause_ms)
        }
    };
    println!(
        "Timing: {}s countdown, {}ms reveal, {}ms answer hold, explanation {}",
        policy.timer_secs, policy.reveal_ms, policy.answer_hold_ms, mode
    );
    println!("Running time: {}", format_clock(timeline.total_ms()));
}
