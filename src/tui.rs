use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::recorder::Recorder;
use crate::state::{AppState, Dialog};
use crate::ticker::{spawn_ticker, TickEvent};

/// Redraw period, about 30 frames per second.
const FRAME_MS: u64 = 33;

/// Run the presentation until the user quits. Returns the recording path
/// when a recording was saved.
pub fn run_tui(mut state: AppState, record: Option<&Path>) -> Result<Option<PathBuf>, String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let mut recorder = match record {
        Some(path) => start_recorder(&terminal, &mut state, path),
        None => None,
    };

    let ticks = spawn_ticker(Duration::from_millis(FRAME_MS));
    let result = main_loop(&mut terminal, &mut state, &ticks, &mut recorder);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result?;

    match recorder {
        Some(rec) => rec
            .finish()
            .map(Some)
            .map_err(|e| format!("Recording failed: {}", e)),
        None => Ok(None),
    }
}

fn start_recorder(
    terminal: &Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    path: &Path,
) -> Option<Recorder> {
    let size = terminal.size().unwrap_or_default();
    match Recorder::start(path, state.branding.title(), size.width, size.height) {
        Ok(rec) => Some(rec),
        Err(e) => {
            tracing::warn!(error = %e, "recording disabled");
            state.set_status(format!("Recording disabled: {}", e));
            None
        }
    }
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    ticks: &mpsc::Receiver<TickEvent>,
    recorder: &mut Option<Recorder>,
) -> Result<(), String> {
    let started = Instant::now();
    let mut announced_end = false;

    loop {
        let completed = terminal
            .draw(|f| crate::ui::draw(f, &state.view()))
            .map_err(|e| format!("Draw error: {}", e))?;

        let failed = match recorder.as_mut() {
            Some(rec) => rec.capture(completed.buffer).err(),
            None => None,
        };
        if let Some(e) = failed {
            tracing::warn!(error = %e, "recording stopped");
            state.set_status(format!("Recording stopped: {}", e));
            *recorder = None;
        }

        if state.should_quit {
            break;
        }

        // Poll for input events
        if event::poll(Duration::from_millis(FRAME_MS / 2))
            .map_err(|e| format!("Poll error: {}", e))?
        {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state);
                }
            }
        }

        let mut due = false;
        while let Ok(TickEvent::Tick) = ticks.try_recv() {
            due = true;
        }
        if due {
            state.advance_to(started.elapsed().as_millis() as u64);
        }

        let halted = state.sequencer.as_ref().map(|s| s.is_halted()).unwrap_or(false);
        if halted && !announced_end {
            announced_end = true;
            if state.status.is_none() {
                state.set_status("End of quiz, press q to exit");
            }
        }
    }

    Ok(())
}

/// Quitting is the only input; the presentation paces itself.
pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if let Some(dialog) = state.top_dialog().copied() {
        match (dialog, key.code) {
            (Dialog::ConfirmQuit, KeyCode::Enter | KeyCode::Char('y')) => {
                state.should_quit = true;
            }
            (Dialog::Help, KeyCode::Enter | KeyCode::Char('?')) => {
                state.pop_dialog();
            }
            (_, KeyCode::Esc | KeyCode::Char('n')) => {
                state.pop_dialog();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.push_dialog(Dialog::ConfirmQuit),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        _ => {}
    }
}
