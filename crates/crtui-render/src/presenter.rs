#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! Writes a [`Buffer`] to a terminal stream. Style changes are emitted only
//! when the next cell's style differs from the last one written, rows that
//! did not change since the previous frame are skipped, and each frame is
//! wrapped in DEC 2026 synchronized output.
//!
//! # Usage
//!
//! ```ignore
//! use crtui_render::{Buffer, Presenter, presenter::ColorMode};
//!
//! let mut presenter = Presenter::new(std::io::stdout(), ColorMode::TrueColor);
//! let frame = Buffer::new(80, 24);
//! presenter.present(&frame)?;
//! ```

use std::io::{self, BufWriter, Write};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
const SYNC_END: &[u8] = b"\x1b[?2026l";
const SGR_RESET: &[u8] = b"\x1b[0m";

/// How colours are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit `38;2;r;g;b` sequences.
    #[default]
    TrueColor,
    /// xterm 256-colour cube approximation.
    Ansi256,
}

impl ColorMode {
    /// Detect from `COLORTERM`.
    pub fn detect() -> Self {
        match std::env::var("COLORTERM") {
            Ok(v) if v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit") => {
                Self::TrueColor
            }
            _ => Self::Ansi256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    flags: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            flags: cell.flags,
        }
    }
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    mode: ColorMode,
    current: Option<CellStyle>,
    previous: Option<Buffer>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W, mode: ColorMode) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            mode,
            current: None,
            previous: None,
        }
    }

    #[inline]
    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    /// Forget the previous frame so the next present repaints every row.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Write one frame and flush.
    pub fn present(&mut self, frame: &Buffer) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("present", w = frame.width(), h = frame.height()).entered();

        let reuse = self
            .previous
            .as_ref()
            .is_some_and(|p| p.width() == frame.width() && p.height() == frame.height());

        self.writer.write_all(SYNC_BEGIN)?;
        for y in 0..frame.height() {
            let row = frame.row_cells(y);
            if reuse && self.previous.as_ref().is_some_and(|p| p.row_cells(y) == row) {
                continue;
            }
            write!(self.writer, "\x1b[{};1H", y + 1)?;
            for cell in row {
                if cell.is_continuation() {
                    continue;
                }
                let style = CellStyle::from_cell(cell);
                if self.current != Some(style) {
                    self.write_style(style)?;
                    self.current = Some(style);
                }
                let mut utf8 = [0u8; 4];
                self.writer
                    .write_all(cell.symbol.encode_utf8(&mut utf8).as_bytes())?;
            }
        }
        self.writer.write_all(SGR_RESET)?;
        self.current = None;
        self.writer.write_all(SYNC_END)?;
        self.writer.flush()?;

        match &mut self.previous {
            Some(prev) if reuse => prev.cells_mut().copy_from_slice(frame.cells()),
            _ => self.previous = Some(frame.clone()),
        }
        Ok(())
    }

    fn write_style(&mut self, style: CellStyle) -> io::Result<()> {
        self.writer.write_all(SGR_RESET)?;
        for (flag, code) in [
            (StyleFlags::BOLD, 1),
            (StyleFlags::DIM, 2),
            (StyleFlags::ITALIC, 3),
            (StyleFlags::UNDERLINE, 4),
            (StyleFlags::BLINK, 5),
            (StyleFlags::REVERSE, 7),
            (StyleFlags::HIDDEN, 8),
            (StyleFlags::STRIKETHROUGH, 9),
        ] {
            if style.flags.contains(flag) {
                write!(self.writer, "\x1b[{code}m")?;
            }
        }
        self.write_color(38, style.fg)?;
        if style.bg.a() == 0 {
            self.writer.write_all(b"\x1b[49m")
        } else {
            self.write_color(48, style.bg)
        }
    }

    fn write_color(&mut self, base: u8, color: PackedRgba) -> io::Result<()> {
        match self.mode {
            ColorMode::TrueColor => write!(
                self.writer,
                "\x1b[{base};2;{};{};{}m",
                color.r(),
                color.g(),
                color.b()
            ),
            ColorMode::Ansi256 => write!(self.writer, "\x1b[{base};5;{}m", cube_index(color)),
        }
    }

    /// Unwrap the inner writer, flushing pending output.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

/// Nearest entry of the xterm 6x6x6 colour cube.
fn cube_index(color: PackedRgba) -> u8 {
    let level = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    16 + 36 * level(color.r()) + 6 * level(color.g()) + level(color.b())
}
