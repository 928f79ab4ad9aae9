use std::path::{Path, PathBuf};
use std::time::Instant;

use ratatui::buffer::Buffer;

use crate::error::CaptureError;
use crate::export::{self, FrameSink};

/// Captures the live presentation frame by frame into a file.
pub struct Recorder {
    sink: Box<dyn FrameSink>,
    started: Instant,
    path: PathBuf,
    frames: u64,
}

impl Recorder {
    pub fn start(path: &Path, title: &str, cols: u16, rows: u16) -> Result<Self, CaptureError> {
        let sink = export::open_sink(path, title, cols, rows, 30)?;
        tracing::info!(path = %path.display(), "recording started");
        Ok(Self::with_sink(sink, path))
    }

    pub fn with_sink(sink: Box<dyn FrameSink>, path: &Path) -> Self {
        Self {
            sink,
            started: Instant::now(),
            path: path.to_path_buf(),
            frames: 0,
        }
    }

    pub fn capture(&mut self, buffer: &Buffer) -> Result<(), CaptureError> {
        let at_ms = self.started.elapsed().as_millis() as u64;
        self.sink.frame(at_ms, buffer)?;
        self.frames += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf, CaptureError> {
        self.sink.finish()?;
        tracing::info!(path = %self.path.display(), frames = self.frames, "recording saved");
        Ok(self.path)
    }
}
