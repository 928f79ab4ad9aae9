//! Offline replay of a quiz into a video or asciicast file.

pub mod cast;
pub mod font;
pub mod raster;
pub mod video;

use std::path::Path;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use crate::error::CaptureError;
use crate::model::{Customization, Question};
use crate::policy::PhasePolicy;
use crate::sequencer::SessionState;
use crate::timeline::QuizTimeline;
use crate::ui::{self, View};

/// Consumer of rendered frames, timestamped from the start of the quiz.
pub trait FrameSink {
    fn frame(&mut self, at_ms: u64, buffer: &Buffer) -> Result<(), CaptureError>;
    fn finish(&mut self) -> Result<(), CaptureError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Webm,
    Mp4,
    Cast,
}

impl Container {
    pub fn from_path(path: &Path) -> Result<Self, CaptureError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("webm") => Ok(Container::Webm),
            Some("mp4") => Ok(Container::Mp4),
            Some("cast") => Ok(Container::Cast),
            _ => Err(CaptureError::Output(format!(
                "unsupported file type {}, use .webm, .mp4 or .cast",
                path.display()
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Container::Webm => "webm",
            Container::Mp4 => "mp4",
            Container::Cast => "cast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub fps: u32,
    pub cols: u16,
    pub rows: u16,
}

impl Default for ExportOptions {
    fn default() -> Self {
        // 120x36 cells map onto 1920x1080 as 16x30 pixel cells.
        Self {
            fps: 30,
            cols: 120,
            rows: 36,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub frames: u64,
    pub duration_ms: u64,
    pub questions: usize,
}

pub fn open_sink(
    path: &Path,
    title: &str,
    cols: u16,
    rows: u16,
    fps: u32,
) -> Result<Box<dyn FrameSink>, CaptureError> {
    match Container::from_path(path)? {
        Container::Cast => Ok(Box::new(cast::CastSink::create(path, title, cols, rows)?)),
        container => Ok(Box::new(video::VideoSink::spawn(path, container, fps)?)),
    }
}

/// Replay the quiz timeline frame by frame into `sink`.
///
/// `progress` is called with (question number, total) whenever the replay
/// reaches a new question.
pub fn render_frames<F>(
    questions: &[Question],
    policy: &PhasePolicy,
    branding: &Customization,
    opts: &ExportOptions,
    sink: &mut dyn FrameSink,
    mut progress: F,
) -> Result<ExportSummary, CaptureError>
where
    F: FnMut(usize, usize),
{
    let timeline = QuizTimeline::new(questions, policy);
    let fps = opts.fps.max(1) as u64;
    let mut terminal = Terminal::new(TestBackend::new(opts.cols, opts.rows))
        .map_err(|e| CaptureError::Output(format!("frame buffer: {}", e)))?;

    let mut frames = 0;
    let mut current = None;
    for k in 0..timeline.frame_count(opts.fps.max(1)) {
        let at_ms = k * 1000 / fps;
        let Some((index, snap)) = timeline.sample(at_ms) else {
            break;
        };
        if current != Some(index) {
            current = Some(index);
            tracing::info!(question = index + 1, total = questions.len(), "exporting");
            progress(index + 1, questions.len());
        }

        let session = SessionState::from_snapshot(index, &snap, &questions[index]);
        let view = View {
            questions,
            session: Some(&session),
            branding,
            density: &policy.density,
            status: None,
            dialog: None,
        };
        let completed = terminal
            .draw(|f| ui::draw(f, &view))
            .map_err(|e| CaptureError::Output(format!("drawing frame: {}", e)))?;
        sink.frame(at_ms, completed.buffer)?;
        frames += 1;
    }

    sink.finish()?;
    Ok(ExportSummary {
        frames,
        duration_ms: timeline.total_ms(),
        questions: questions.len(),
    })
}

pub fn progress_message(question: usize, total: usize) -> String {
    format!("Processing question {} of {}", question, total)
}
