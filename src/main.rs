use std::path::Path;

use clap::Parser;

use quizreel::cli::Cli;
use quizreel::error::LoadError;
use quizreel::export::{self, ExportOptions};
use quizreel::model::Question;
use quizreel::policy::OnEmpty;
use quizreel::sequencer::Sequencer;
use quizreel::state::AppState;
use quizreel::{config, defaults, loader, logging, persist, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let batch = cli.check || cli.export.is_some();
    let _log_guard = logging::init(cli.log.as_deref(), batch)?;

    let policy = config::resolve_policy(&cli)?;
    let store = persist::branding_path();
    let branding = config::resolve_branding(&cli, store.as_deref())?;

    // Load questions
    let (questions, source) = load_questions(cli.path.as_deref(), policy.on_empty)?;

    if cli.check {
        persist::print_summary(&questions, &policy, &source);
        return Ok(());
    }

    if let Some(ref out) = cli.export {
        if questions.is_empty() {
            return Err("Nothing to export: the quiz has no questions".to_string());
        }
        let opts = ExportOptions::default();
        let mut sink = export::open_sink(out, branding.title(), opts.cols, opts.rows, opts.fps)
            .map_err(|e| e.to_string())?;
        let summary = export::render_frames(
            &questions,
            &policy,
            &branding,
            &opts,
            sink.as_mut(),
            |i, n| eprintln!("{}", export::progress_message(i, n)),
        )
        .map_err(|e| e.to_string())?;
        eprintln!(
            "Exported {} frames ({}) to {}",
            summary.frames,
            quizreel::ticker::format_clock(summary.duration_ms),
            out.display()
        );
        return Ok(());
    }

    let density = policy.density.clone();
    let sequencer = Sequencer::new(questions, policy);
    let state = AppState::new(sequencer, branding, density);

    if let Some(path) = tui::run_tui(state, cli.record.as_deref())? {
        eprintln!("Recording saved to {}", path.display());
    }

    Ok(())
}

fn load_questions(
    path: Option<&Path>,
    on_empty: OnEmpty,
) -> Result<(Vec<Question>, String), String> {
    let (questions, source) = match path {
        Some(p) => match loader::load_file(p) {
            Ok(questions) => (questions, p.display().to_string()),
            Err(LoadError::Empty) => (Vec::new(), p.display().to_string()),
            Err(LoadError::Io(msg)) => return Err(msg),
            Err(e) => return Err(format!("{}: {}", p.display(), e)),
        },
        None => (Vec::new(), "no quiz file".to_string()),
    };

    if !questions.is_empty() {
        return Ok((questions, source));
    }

    match on_empty {
        OnEmpty::Fallback => {
            tracing::info!(source = %source, "no questions, using the sample quiz");
            Ok((defaults::default_questions(), "built-in sample quiz".to_string()))
        }
        OnEmpty::Exit => Err("no quiz data, supply a JSON or CSV file".to_string()),
        OnEmpty::Blank => Ok((Vec::new(), source)),
    }
}
