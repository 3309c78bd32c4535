#![forbid(unsafe_code)]

//! Drawing primitives for the buffer.
//!
//! All operations go through `Buffer::set()` and therefore respect the
//! scissor stack.

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba};
use crtui_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };
}

/// Extension trait for drawing on a Buffer.
pub trait Draw {
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell);

    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell);

    /// Print text using the colours and flags of `base`.
    ///
    /// Stops at the buffer edge. Returns the x position after the last glyph.
    fn print_text(&mut self, x: u16, y: u16, text: &str, base: Cell) -> u16;

    /// Like `print_text`, stopping at `max_x` (exclusive).
    ///
    /// Zero-width characters are dropped. A wide glyph that would straddle
    /// `max_x` is not started.
    fn print_text_clipped(&mut self, x: u16, y: u16, text: &str, base: Cell, max_x: u16) -> u16;

    /// Draw a border inside `rect`.
    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base: Cell);

    /// Recolour cells in `rect` without changing their symbols.
    fn paint_area(&mut self, rect: Rect, fg: Option<PackedRgba>, bg: Option<PackedRgba>);
}

impl Draw for Buffer {
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell) {
        for i in 0..width {
            self.set(x.saturating_add(i), y, cell);
        }
    }

    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell) {
        for i in 0..height {
            self.set(x, y.saturating_add(i), cell);
        }
    }

    fn print_text(&mut self, x: u16, y: u16, text: &str, base: Cell) -> u16 {
        self.print_text_clipped(x, y, text, base, self.width())
    }

    fn print_text_clipped(&mut self, x: u16, y: u16, text: &str, base: Cell, max_x: u16) -> u16 {
        let mut cx = x;
        for c in text.chars() {
            let width = UnicodeWidthChar::width(c).unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if cx.saturating_add(width) > max_x {
                break;
            }
            self.set(cx, y, base.with_char(c));
            for tail in 1..width {
                self.set(cx + tail, y, Cell::CONTINUATION.with_bg(base.bg));
            }
            cx = cx.saturating_add(width);
        }
        cx
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base: Cell) {
        if rect.is_empty() {
            return;
        }
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        self.draw_horizontal_line(rect.x, rect.y, rect.width, base.with_char(chars.horizontal));
        if rect.height > 1 {
            self.draw_horizontal_line(rect.x, bottom, rect.width, base.with_char(chars.horizontal));
        }
        if rect.height > 2 {
            let v = base.with_char(chars.vertical);
            self.draw_vertical_line(rect.x, rect.y + 1, rect.height - 2, v);
            if rect.width > 1 {
                self.draw_vertical_line(right, rect.y + 1, rect.height - 2, v);
            }
        }

        self.set(rect.x, rect.y, base.with_char(chars.top_left));
        if rect.width > 1 {
            self.set(right, rect.y, base.with_char(chars.top_right));
        }
        if rect.height > 1 {
            self.set(rect.x, bottom, base.with_char(chars.bottom_left));
            if rect.width > 1 {
                self.set(right, bottom, base.with_char(chars.bottom_right));
            }
        }
    }

    fn paint_area(&mut self, rect: Rect, fg: Option<PackedRgba>, bg: Option<PackedRgba>) {
        for y in rect.rows() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    if let Some(fg) = fg {
                        cell.fg = fg;
                    }
                    if let Some(bg) = bg {
                        cell.bg = bg;
                    }
                }
            }
        }
    }
}

/// Display width of `text` in cells, ignoring zero-width characters.
pub fn text_width(text: &str) -> u16 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as u16)
        .fold(0u16, u16::saturating_add)
}
