use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use ratatui::buffer::Buffer;

use super::raster::{rasterize, FRAME_HEIGHT, FRAME_WIDTH};
use super::{Container, FrameSink};
use crate::error::CaptureError;

/// Encoders to try per container, best first.
fn codec_candidates(container: Container) -> &'static [&'static str] {
    match container {
        Container::Webm => &["libvpx-vp9", "libvpx"],
        Container::Mp4 => &["libx264", "mpeg4"],
        Container::Cast => &[],
    }
}

/// First candidate codec listed in `ffmpeg -encoders` output.
pub fn pick_codec(container: Container, encoders: &str) -> Option<&'static str> {
    let available: Vec<&str> = encoders
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .collect();
    codec_candidates(container)
        .iter()
        .copied()
        .find(|codec| available.contains(codec))
}

fn probe_encoders() -> Result<String, CaptureError> {
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CaptureError::EncoderUnavailable("ffmpeg was not found on PATH".into())
            } else {
                CaptureError::EncoderUnavailable(format!("cannot run ffmpeg: {}", e))
            }
        })?;

    if !output.status.success() {
        return Err(CaptureError::EncoderUnavailable(
            "ffmpeg -encoders failed".into(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Streams rasterized frames into an ffmpeg child at a constant rate.
pub struct VideoSink {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    path: PathBuf,
    fps: u32,
    written: u64,
    last: Option<Vec<u8>>,
}

impl VideoSink {
    pub fn spawn(path: &Path, container: Container, fps: u32) -> Result<Self, CaptureError> {
        let encoders = probe_encoders()?;
        let codec = pick_codec(container, &encoders).ok_or_else(|| {
            CaptureError::EncoderUnavailable(format!(
                "this ffmpeg build has no {} encoder",
                container.name()
            ))
        })?;
        tracing::info!(codec, path = %path.display(), "starting encoder");

        let size = format!("{}x{}", FRAME_WIDTH, FRAME_HEIGHT);
        let rate = fps.to_string();
        let mut child = Command::new("ffmpeg")
            .args(["-y", "-loglevel", "error"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", &size, "-r", &rate, "-i", "-"])
            .args(["-c:v", codec, "-pix_fmt", "yuv420p"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CaptureError::EncoderUnavailable(format!("cannot start ffmpeg: {}", e)))?;

        let stdin = child.stdin.take();
        Ok(Self {
            child: Some(child),
            stdin,
            path: path.to_path_buf(),
            fps: fps.max(1),
            written: 0,
            last: None,
        })
    }
}

fn write_raw(stdin: &mut Option<ChildStdin>, image: &[u8]) -> Result<(), CaptureError> {
    let pipe = stdin
        .as_mut()
        .ok_or_else(|| CaptureError::Encoder("encoder input is already closed".into()))?;
    pipe.write_all(image)
        .map_err(|e| CaptureError::Encoder(format!("ffmpeg stopped accepting frames: {}", e)))
}

impl FrameSink for VideoSink {
    fn frame(&mut self, at_ms: u64, buffer: &Buffer) -> Result<(), CaptureError> {
        let image = rasterize(buffer, FRAME_WIDTH, FRAME_HEIGHT);
        let slot = (at_ms * self.fps as u64 + 500) / 1000;

        // Hold the previous image over any gap so playback keeps wall-clock time.
        while self.written < slot {
            let pad = self.last.as_deref().unwrap_or(&image);
            write_raw(&mut self.stdin, pad)?;
            self.written += 1;
        }
        if self.written == slot {
            write_raw(&mut self.stdin, &image)?;
            self.written += 1;
        }
        self.last = Some(image);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CaptureError> {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Ok(());
        };
        let output = child
            .wait_with_output()
            .map_err(|e| CaptureError::Encoder(format!("cannot wait for ffmpeg: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::Encoder(format!(
                "ffmpeg failed writing {}: {}",
                self.path.display(),
                stderr.trim()
            )));
        }
        tracing::info!(frames = self.written, path = %self.path.display(), "video written");
        Ok(())
    }
}

impl Drop for VideoSink {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
    }
}
