#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s. It is used both for the frame
//! being composed and for every pre-rendered surface.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Scissor stack intersection monotonically decreases on push
//! 4. The scissor stack always has at least one element

use crate::cell::Cell;
use crtui_core::geometry::Rect;

/// A 2D grid of terminal cells.
///
/// # Example
///
/// ```
/// use crtui_render::buffer::Buffer;
/// use crtui_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a buffer filled with blank, transparent cells.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0, "buffer width must be > 0");
        assert!(height > 0, "buffer height must be > 0");

        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            scissor_stack: vec![Rect::from_size(width, height)],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full buffer area.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell, respecting bounds and the current scissor.
    ///
    /// The new background is composited over the existing one, so a
    /// partially transparent cell tints rather than replaces.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if !self.current_scissor().contains(x, y) {
            return;
        }
        let bg = cell.bg.over(self.cells[idx].bg);
        self.cells[idx] = Cell { bg, ..cell };
    }

    /// Write a cell verbatim. Ignores the scissor; out-of-bounds is a no-op.
    pub fn set_raw(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Fill a rectangle (clipped to bounds and scissor).
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clip = rect.intersection(&self.current_scissor());
        for y in clip.rows() {
            for x in clip.x..clip.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reset every cell to `cell`, ignoring the scissor.
    pub fn clear_with(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Mutable access to one row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_cells_mut(&mut self, y: u16) -> &mut [Cell] {
        let start = y as usize * self.width as usize;
        let width = self.width as usize;
        &mut self.cells[start..start + width]
    }

    // ----- Scissor stack -----

    /// Narrow the writable region to `rect` intersected with the current one.
    pub fn push_scissor(&mut self, rect: Rect) {
        let next = rect.intersection(&self.current_scissor());
        self.scissor_stack.push(next);
    }

    /// Restore the previous writable region. The base region is never popped.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    #[inline]
    pub fn scissor_depth(&self) -> usize {
        self.scissor_stack.len()
    }

    // ----- Surface transfer -----

    /// Composite `src` with its top-left corner at (`x`, `y`).
    ///
    /// Offsets may be negative; the surface is clipped on every side.
    /// Transparent source cells are skipped. A blank source cell with a
    /// tinted background keeps the destination symbol and only tints it.
    pub fn blit(&mut self, src: &Buffer, x: i32, y: i32) {
        let scissor = self.current_scissor();
        for sy in 0..src.height {
            let ty = y + sy as i32;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let tx = x + sx as i32;
                if tx < 0 || tx >= self.width as i32 {
                    continue;
                }
                let (tx, ty) = (tx as u16, ty as u16);
                if !scissor.contains(tx, ty) {
                    continue;
                }
                let cell = src.cells[sy as usize * src.width as usize + sx as usize];
                if cell.is_transparent() {
                    continue;
                }
                let idx = ty as usize * self.width as usize + tx as usize;
                let dst = &mut self.cells[idx];
                dst.bg = cell.bg.over(dst.bg);
                if cell.symbol != ' ' || cell.bg.a() == 255 {
                    dst.symbol = cell.symbol;
                    dst.fg = cell.fg;
                    dst.flags = cell.flags;
                }
            }
        }
    }

    /// Move every row by `dy` (positive is down), in place.
    ///
    /// Rows uncovered by the move keep their previous contents, like a
    /// surface blitted onto itself at an offset.
    pub fn shift_rows(&mut self, dy: i32) {
        let h = self.height as i32;
        if dy == 0 || dy.abs() >= h {
            return;
        }
        let w = self.width as usize;
        let moved = (h - dy.abs()) as usize * w;
        if dy > 0 {
            self.cells.copy_within(0..moved, dy as usize * w);
        } else {
            let from = (-dy) as usize * w;
            self.cells.copy_within(from..from + moved, 0);
        }
    }

    /// Move the cells of rows `y..y + height` by `dx` columns, in place.
    ///
    /// Uncovered columns keep their previous contents.
    pub fn shift_span(&mut self, y: u16, height: u16, dx: i32) {
        let w = self.width as i32;
        if dx == 0 || dx.abs() >= w {
            return;
        }
        let end = y.saturating_add(height).min(self.height);
        let moved = (w - dx.abs()) as usize;
        for row in y..end {
            let cells = self.row_cells_mut(row);
            if dx > 0 {
                cells.copy_within(0..moved, dx as usize);
            } else {
                let from = (-dx) as usize;
                cells.copy_within(from..from + moved, 0);
            }
        }
    }

    /// Compare cell contents only (scissor state is ignored).
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Default for Buffer {
    /// A 1x1 buffer.
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl Eq for Buffer {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> char {
        buf.get(x, y).map(|c| c.symbol).unwrap_or('?')
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        buf.row_cells(y).iter().map(|c| c.symbol).collect()
    }

    #[test]
    #[should_panic(expected = "width must be > 0")]
    fn zero_width_panics() {
        let _ = Buffer::new(0, 1);
    }

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 3);
        assert_eq!(buf.cells().len(), 12);
        assert!(buf.cells().iter().all(Cell::is_transparent));
    }

    #[test]
    fn set_out_of_bounds_is_noop() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.cells().iter().all(Cell::is_transparent));
    }

    #[test]
    fn set_composites_background() {
        let mut buf = Buffer::new(1, 1);
        buf.set(0, 0, Cell::BLANK.with_bg(PackedRgba::BLACK));
        buf.set(0, 0, Cell::from_char('a').with_bg(PackedRgba::TRANSPARENT));
        let cell = buf.get(0, 0).copied().unwrap_or_default();
        assert_eq!(cell.symbol, 'a');
        assert_eq!(cell.bg, PackedRgba::BLACK);
    }

    #[test]
    fn scissor_clips_writes() {
        let mut buf = Buffer::new(5, 1);
        buf.push_scissor(Rect::new(1, 0, 2, 1));
        for x in 0..5 {
            buf.set(x, 0, Cell::from_char('#'));
        }
        buf.pop_scissor();
        assert_eq!(row_text(&buf, 0), " ##  ");
    }

    #[test]
    fn scissor_only_narrows() {
        let mut buf = Buffer::new(10, 10);
        buf.push_scissor(Rect::new(0, 0, 5, 5));
        buf.push_scissor(Rect::new(3, 3, 10, 10));
        assert_eq!(buf.current_scissor(), Rect::new(3, 3, 2, 2));
        buf.pop_scissor();
        buf.pop_scissor();
        buf.pop_scissor();
        assert_eq!(buf.scissor_depth(), 1);
        assert_eq!(buf.current_scissor(), buf.bounds());
    }

    #[test]
    fn blit_skips_transparent_cells() {
        let mut dst = Buffer::new(4, 1);
        dst.clear_with(Cell::from_char('.'));
        let mut src = Buffer::new(3, 1);
        src.set(1, 0, Cell::from_char('X'));
        dst.blit(&src, 1, 0);
        assert_eq!(row_text(&dst, 0), "..X.");
    }

    #[test]
    fn blit_clips_negative_offsets() {
        let mut dst = Buffer::new(3, 2);
        let mut src = Buffer::new(3, 2);
        src.clear_with(Cell::from_char('o'));
        dst.blit(&src, -2, -1);
        assert_eq!(symbol_at(&dst, 0, 0), 'o');
        assert_eq!(symbol_at(&dst, 1, 0), ' ');
        assert_eq!(symbol_at(&dst, 0, 1), ' ');
    }

    #[test]
    fn blit_opaque_blank_erases() {
        let mut dst = Buffer::new(2, 1);
        dst.clear_with(Cell::from_char('-'));
        let mut src = Buffer::new(1, 1);
        src.set_raw(0, 0, Cell::BLANK.with_bg(PackedRgba::BLACK));
        dst.blit(&src, 0, 0);
        assert_eq!(row_text(&dst, 0), " -");
    }

    #[test]
    fn blit_tinted_blank_keeps_symbol() {
        let mut dst = Buffer::new(1, 1);
        dst.set_raw(0, 0, Cell::from_char('k').with_bg(PackedRgba::BLACK));
        let mut src = Buffer::new(1, 1);
        src.set_raw(0, 0, Cell::BLANK.with_bg(PackedRgba::rgba(0, 255, 0, 10)));
        dst.blit(&src, 0, 0);
        let cell = dst.get(0, 0).copied().unwrap_or_default();
        assert_eq!(cell.symbol, 'k');
        assert!(cell.bg.g() > 0);
    }

    #[test]
    fn shift_rows_down_keeps_vacated_rows() {
        let mut buf = Buffer::new(1, 4);
        for (y, c) in "abcd".chars().enumerate() {
            buf.set_raw(0, y as u16, Cell::from_char(c));
        }
        buf.shift_rows(1);
        let col: String = (0..4).map(|y| symbol_at(&buf, 0, y)).collect();
        assert_eq!(col, "aabc");
    }

    #[test]
    fn shift_rows_up() {
        let mut buf = Buffer::new(1, 4);
        for (y, c) in "abcd".chars().enumerate() {
            buf.set_raw(0, y as u16, Cell::from_char(c));
        }
        buf.shift_rows(-2);
        let col: String = (0..4).map(|y| symbol_at(&buf, 0, y)).collect();
        assert_eq!(col, "cdcd");
    }

    #[test]
    fn shift_rows_beyond_height_is_noop() {
        let mut buf = Buffer::new(1, 2);
        buf.set_raw(0, 0, Cell::from_char('a'));
        let before = buf.clone();
        buf.shift_rows(5);
        assert_eq!(buf, before);
    }

    #[test]
    fn shift_span_moves_only_selected_rows() {
        let mut buf = Buffer::new(4, 2);
        for y in 0..2 {
            for (x, c) in "abcd".chars().enumerate() {
                buf.set_raw(x as u16, y, Cell::from_char(c));
            }
        }
        buf.shift_span(1, 1, 1);
        assert_eq!(row_text(&buf, 0), "abcd");
        assert_eq!(row_text(&buf, 1), "aabc");
        buf.shift_span(0, 1, -2);
        assert_eq!(row_text(&buf, 0), "cdcd");
    }
}
