#![forbid(unsafe_code)]

//! Cell and colour primitives.
//!
//! A [`Cell`] is one terminal grid slot: a symbol, straight-alpha
//! foreground and background colours, and style flags. The blank cell has a
//! transparent background, which is what makes pre-rendered surfaces
//! composable.

use unicode_width::UnicodeWidthChar;

/// A compact RGBA colour.
///
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
/// - **Alpha:** straight (channels are not pre-multiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque colour.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Same colour with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Porter-Duff SourceOver: `self over dst`.
    ///
    /// Computed in the 255² domain and rounded once at the end.
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            div_round_u8((s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a, numer_a)
        };
        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            div_round_u8(numer_a, 255),
        )
    }
}

#[inline]
const fn div_round_u8(numer: u64, denom: u64) -> u8 {
    let v = (numer + (denom / 2)) / denom;
    if v > 255 { 255 } else { v as u8 }
}

bitflags::bitflags! {
    /// 8-bit cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const BLINK         = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
        const STRIKETHROUGH = 0b0100_0000;
        const HIDDEN        = 0b1000_0000;
    }
}

/// One grid slot.
///
/// # Invariants
///
/// - `symbol == CONTINUATION_SYMBOL` marks the tail of a wide glyph; the
///   presenter skips it.
/// - A cell is *transparent* when it is blank and its background alpha is
///   zero. Transparent cells are skipped by [`crate::Buffer::blit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub symbol: char,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: StyleFlags,
}

impl Cell {
    /// Symbol stored in the trailing half of a double-width glyph.
    pub const CONTINUATION_SYMBOL: char = '\0';

    /// Blank, transparent cell.
    pub const BLANK: Self = Self {
        symbol: ' ',
        fg: PackedRgba::WHITE,
        bg: PackedRgba::TRANSPARENT,
        flags: StyleFlags::empty(),
    };

    /// Trailing half of a wide glyph.
    pub const CONTINUATION: Self = Self {
        symbol: Self::CONTINUATION_SYMBOL,
        ..Self::BLANK
    };

    #[inline]
    pub const fn from_char(symbol: char) -> Self {
        Self {
            symbol,
            ..Self::BLANK
        }
    }

    #[inline]
    pub const fn with_char(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    #[inline]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.symbol == Self::CONTINUATION_SYMBOL
    }

    /// Blank with a fully transparent background.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.symbol == ' ' && self.bg.a() == 0
    }

    /// Display width of the symbol in cells (0 for continuations).
    pub fn width(&self) -> usize {
        if self.is_continuation() {
            return 0;
        }
        self.symbol.width().unwrap_or(0)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip_through_packing() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn over_with_opaque_source_returns_source() {
        let src = PackedRgba::rgb(10, 20, 30);
        assert_eq!(src.over(PackedRgba::WHITE), src);
    }

    #[test]
    fn over_with_transparent_source_returns_destination() {
        let dst = PackedRgba::rgb(10, 20, 30);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_half_alpha_mixes_evenly() {
        let src = PackedRgba::rgba(255, 0, 0, 128);
        let out = src.over(PackedRgba::BLACK);
        assert_eq!(out.a(), 255);
        assert!((127..=129).contains(&out.r()));
        assert_eq!(out.g(), 0);
    }

    #[test]
    fn blank_cell_is_transparent() {
        assert!(Cell::BLANK.is_transparent());
        assert!(!Cell::from_char('x').is_transparent());
        assert!(!Cell::BLANK.with_bg(PackedRgba::BLACK).is_transparent());
    }

    #[test]
    fn wide_glyph_width() {
        assert_eq!(Cell::from_char('a').width(), 1);
        assert_eq!(Cell::from_char('界').width(), 2);
        assert_eq!(Cell::CONTINUATION.width(), 0);
    }
}
