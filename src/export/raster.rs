use ratatui::buffer::{Buffer, Cell};
use ratatui::style::{Color, Modifier};

use super::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

pub const FRAME_WIDTH: usize = 1920;
pub const FRAME_HEIGHT: usize = 1080;

const DEFAULT_FG: [u8; 3] = [230, 230, 230];
const DEFAULT_BG: [u8; 3] = [18, 18, 24];

pub fn rgb(color: Color, fallback: [u8; 3]) -> [u8; 3] {
    match color {
        Color::Reset => fallback,
        Color::Black => [0, 0, 0],
        Color::Red => [205, 49, 49],
        Color::Green => [13, 188, 121],
        Color::Yellow => [229, 229, 16],
        Color::Blue => [36, 114, 200],
        Color::Magenta => [188, 63, 188],
        Color::Cyan => [17, 168, 205],
        Color::Gray => [204, 204, 204],
        Color::DarkGray => [102, 102, 102],
        Color::LightRed => [241, 76, 76],
        Color::LightGreen => [35, 209, 139],
        Color::LightYellow => [245, 245, 67],
        Color::LightBlue => [59, 142, 234],
        Color::LightMagenta => [214, 112, 214],
        Color::LightCyan => [41, 184, 219],
        Color::White => [255, 255, 255],
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => indexed(i),
    }
}

/// xterm 256-colour palette.
fn indexed(i: u8) -> [u8; 3] {
    const BASE: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match i {
        0..=15 => rgb(BASE[i as usize], DEFAULT_FG),
        16..=231 => {
            let n = i - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            [level(n / 36), level((n / 6) % 6), level(n % 6)]
        }
        _ => {
            let v = 8 + (i - 232) * 10;
            [v, v, v]
        }
    }
}

/// Pixel canvas holding packed RGB triples.
struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            pixels.extend_from_slice(&DEFAULT_BG);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn fill(&mut self, x: usize, y: usize, w: usize, h: usize, color: [u8; 3]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = py * self.width;
            for px in x.min(x_end)..x_end {
                let i = (row + px) * 3;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }
}

/// Cell geometry for a `cols` x `rows` grid on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub cell_width: usize,
    pub cell_height: usize,
    pub scale_x: usize,
    pub scale_y: usize,
    pub offset_x: usize,
    pub offset_y: usize,
}

impl CellGeometry {
    pub fn new(frame_width: usize, frame_height: usize, cols: u16, rows: u16) -> Self {
        let cell_width = (frame_width / cols.max(1) as usize).max(1);
        let cell_height = (frame_height / rows.max(1) as usize).max(1);
        // One pixel column and row of spacing around each glyph.
        let scale_x = (cell_width / (GLYPH_WIDTH + 1)).max(1);
        let scale_y = (cell_height / (GLYPH_HEIGHT + 1)).max(1);
        Self {
            cell_width,
            cell_height,
            scale_x,
            scale_y,
            offset_x: cell_width.saturating_sub(GLYPH_WIDTH * scale_x) / 2,
            offset_y: cell_height.saturating_sub(GLYPH_HEIGHT * scale_y) / 2,
        }
    }
}

/// Render a terminal buffer to a `width` x `height` RGB24 image.
pub fn rasterize(buffer: &Buffer, width: usize, height: usize) -> Vec<u8> {
    let area = buffer.area;
    let geo = CellGeometry::new(width, height, area.width, area.height);
    let mut canvas = Canvas::new(width, height);

    for row in 0..area.height {
        for col in 0..area.width {
            let Some(cell) = buffer.cell((area.x + col, area.y + row)) else {
                continue;
            };
            let x = col as usize * geo.cell_width;
            let y = row as usize * geo.cell_height;
            draw_cell(&mut canvas, &geo, x, y, cell);
        }
    }

    canvas.pixels
}

fn draw_cell(canvas: &mut Canvas, geo: &CellGeometry, x: usize, y: usize, cell: &Cell) {
    let mut fg = rgb(cell.fg, DEFAULT_FG);
    let mut bg = rgb(cell.bg, DEFAULT_BG);
    if cell.modifier.contains(Modifier::REVERSED) {
        std::mem::swap(&mut fg, &mut bg);
    }
    if cell.modifier.contains(Modifier::DIM) {
        fg = [fg[0] / 2, fg[1] / 2, fg[2] / 2];
    }

    canvas.fill(x, y, geo.cell_width, geo.cell_height, bg);

    let Some(c) = cell.symbol().chars().next() else {
        return;
    };
    if c == ' ' {
        return;
    }

    if let Some(eighths) = left_block_eighths(c) {
        let w = geo.cell_width * eighths / 8;
        canvas.fill(x, y, w, geo.cell_height, fg);
    } else if let Some(arms) = box_arms(c) {
        draw_box(canvas, geo, x, y, arms, fg);
    } else {
        draw_glyph(canvas, geo, x, y, c, fg, cell.modifier.contains(Modifier::BOLD));
    }

    if cell.modifier.contains(Modifier::UNDERLINED) {
        let thickness = geo.scale_y.max(1);
        let uy = y + geo.cell_height.saturating_sub(thickness + 1);
        canvas.fill(x, uy, geo.cell_width, thickness, fg);
    }
}

fn draw_glyph(
    canvas: &mut Canvas,
    geo: &CellGeometry,
    x: usize,
    y: usize,
    c: char,
    fg: [u8; 3],
    bold: bool,
) {
    let columns = font::glyph(c);
    let extra = if bold { 1 } else { 0 };
    for gx in 0..GLYPH_WIDTH {
        for gy in 0..GLYPH_HEIGHT {
            if !font::pixel(&columns, gx, gy) {
                continue;
            }
            canvas.fill(
                x + geo.offset_x + gx * geo.scale_x,
                y + geo.offset_y + gy * geo.scale_y,
                geo.scale_x + extra,
                geo.scale_y,
                fg,
            );
        }
    }
}

/// Fill width in eighths for left block elements.
fn left_block_eighths(c: char) -> Option<usize> {
    match c {
        '▏' => Some(1),
        '▎' => Some(2),
        '▍' => Some(3),
        '▌' => Some(4),
        '▋' => Some(5),
        '▊' => Some(6),
        '▉' => Some(7),
        '█' => Some(8),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Arms {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

fn box_arms(c: char) -> Option<Arms> {
    let (left, right, up, down) = match c {
        '─' | '━' => (true, true, false, false),
        '│' | '┃' => (false, false, true, true),
        '┌' | '╭' | '┏' => (false, true, false, true),
        '┐' | '╮' | '┓' => (true, false, false, true),
        '└' | '╰' | '┗' => (false, true, true, false),
        '┘' | '╯' | '┛' => (true, false, true, false),
        '├' => (false, true, true, true),
        '┤' => (true, false, true, true),
        '┬' => (true, true, false, true),
        '┴' => (true, true, true, false),
        '┼' => (true, true, true, true),
        _ => return None,
    };
    Some(Arms {
        left,
        right,
        up,
        down,
    })
}

fn draw_box(canvas: &mut Canvas, geo: &CellGeometry, x: usize, y: usize, arms: Arms, fg: [u8; 3]) {
    let t = 2;
    let cx = x + (geo.cell_width / 2).saturating_sub(t / 2);
    let cy = y + (geo.cell_height / 2).saturating_sub(t / 2);
    if arms.left {
        canvas.fill(x, cy, cx - x + t, t, fg);
    }
    if arms.right {
        canvas.fill(cx, cy, x + geo.cell_width - cx, t, fg);
    }
    if arms.up {
        canvas.fill(cx, y, t, cy - y + t, fg);
    }
    if arms.down {
        canvas.fill(cx, cy, t, y + geo.cell_height - cy, fg);
    }
}

