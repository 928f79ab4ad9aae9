//! asciicast v2 writer: a JSON header line, then one `[time, "o", data]`
//! event per frame that differs from the previous one.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};
use serde::Serialize;

use super::FrameSink;
use crate::error::CaptureError;

#[derive(Serialize)]
struct Header<'a> {
    version: u8,
    width: u16,
    height: u16,
    timestamp: i64,
    title: &'a str,
}

pub struct CastSink<W: Write> {
    out: W,
    last: Option<Buffer>,
    events: usize,
}

impl CastSink<BufWriter<File>> {
    pub fn create(path: &Path, title: &str, cols: u16, rows: u16) -> Result<Self, CaptureError> {
        let file = File::create(path)
            .map_err(|e| CaptureError::Output(format!("{}: {}", path.display(), e)))?;
        CastSink::new(BufWriter::new(file), title, cols, rows)
    }
}

impl<W: Write> CastSink<W> {
    pub fn new(mut out: W, title: &str, cols: u16, rows: u16) -> Result<Self, CaptureError> {
        let header = Header {
            version: 2,
            width: cols,
            height: rows,
            timestamp: chrono::Utc::now().timestamp(),
            title,
        };
        let line = serde_json::to_string(&header)
            .map_err(|e| CaptureError::Output(format!("cast header: {}", e)))?;
        writeln!(out, "{}", line).map_err(write_error)?;
        Ok(Self {
            out,
            last: None,
            events: 0,
        })
    }

    /// Number of output events written so far.
    pub fn events(&self) -> usize {
        self.events
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for CastSink<W> {
    fn frame(&mut self, at_ms: u64, buffer: &Buffer) -> Result<(), CaptureError> {
        if self.last.as_ref() == Some(buffer) {
            return Ok(());
        }

        let mut data = String::new();
        if self.last.is_none() {
            data.push_str("\x1b[2J");
        }
        data.push_str(&buffer_to_ansi(buffer));

        let event = (at_ms as f64 / 1000.0, "o", data);
        let line = serde_json::to_string(&event)
            .map_err(|e| CaptureError::Output(format!("cast event: {}", e)))?;
        writeln!(self.out, "{}", line).map_err(write_error)?;

        self.events += 1;
        self.last = Some(buffer.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CaptureError> {
        self.out.flush().map_err(write_error)
    }
}

fn write_error(e: std::io::Error) -> CaptureError {
    CaptureError::Output(e.to_string())
}

/// Repaint the whole screen: cursor home per row, SGR on style changes.
pub fn buffer_to_ansi(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();

    for row in 0..area.height {
        out.push_str(&format!("\x1b[{};1H\x1b[0m", row + 1));
        let mut current: Option<(Color, Color, Modifier)> = None;
        for col in 0..area.width {
            let Some(cell) = buffer.cell((area.x + col, area.y + row)) else {
                continue;
            };
            let style = (cell.fg, cell.bg, cell.modifier);
            if current != Some(style) {
                out.push_str(&sgr(cell.fg, cell.bg, cell.modifier));
                current = Some(style);
            }
            out.push_str(cell.symbol());
        }
    }
    out.push_str("\x1b[0m");
    out
}

fn sgr(fg: Color, bg: Color, modifier: Modifier) -> String {
    let mut codes = vec!["0".to_string()];
    if modifier.contains(Modifier::BOLD) {
        codes.push("1".into());
    }
    if modifier.contains(Modifier::DIM) {
        codes.push("2".into());
    }
    if modifier.contains(Modifier::ITALIC) {
        codes.push("3".into());
    }
    if modifier.contains(Modifier::UNDERLINED) {
        codes.push("4".into());
    }
    if modifier.contains(Modifier::REVERSED) {
        codes.push("7".into());
    }
    codes.push(color_code(fg, false));
    codes.push(color_code(bg, true));
    format!("\x1b[{}m", codes.join(";"))
}

fn color_code(color: Color, background: bool) -> String {
    let base = if background { 40 } else { 30 };
    let bright = if background { 100 } else { 90 };
    match color {
        Color::Reset => (base + 9).to_string(),
        Color::Black => base.to_string(),
        Color::Red => (base + 1).to_string(),
        Color::Green => (base + 2).to_string(),
        Color::Yellow => (base + 3).to_string(),
        Color::Blue => (base + 4).to_string(),
        Color::Magenta => (base + 5).to_string(),
        Color::Cyan => (base + 6).to_string(),
        Color::Gray => (base + 7).to_string(),
        Color::DarkGray => bright.to_string(),
        Color::LightRed => (bright + 1).to_string(),
        Color::LightGreen => (bright + 2).to_string(),
        Color::LightYellow => (bright + 3).to_string(),
        Color::LightBlue => (bright + 4).to_string(),
        Color::LightMagenta => (bright + 5).to_string(),
        Color::LightCyan => (bright + 6).to_string(),
        Color::White => (bright + 7).to_string(),
        Color::Rgb(r, g, b) => format!("{};2;{};{};{}", base + 8, r, g, b),
        Color::Indexed(i) => format!("{};5;{}", base + 8, i),
    }
}
