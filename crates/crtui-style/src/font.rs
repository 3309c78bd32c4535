#![forbid(unsafe_code)]

//! Glyph fonts: text measurement and rasterization into cell surfaces.
//!
//! Terminal glyphs have a fixed cell size, so a "font" here is a style
//! (weight, decoration) plus the measuring and rasterizing logic.
//!
//! [`GlyphFont::rasterize`] produces a standalone label surface and is the
//! only counted operation; surface caches call it while building and never
//! afterwards. [`GlyphFont::draw`] writes into a surface the caller already
//! owns and is not counted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crtui_render::drawing::{Draw, text_width};
use crtui_render::{Buffer, Cell, PackedRgba, StyleFlags};

/// Where a font is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Main tab labels.
    Tab,
    /// Sub-tab labels.
    SubTab,
    /// Tab content.
    Body,
    /// Footer segments.
    Footer,
}

/// Measures and rasterizes single-line text.
#[derive(Debug, Clone)]
pub struct GlyphFont {
    flags: StyleFlags,
    rasterized: Arc<AtomicU64>,
}

impl GlyphFont {
    /// A font sharing `counter` with its siblings.
    pub fn new(flags: StyleFlags, counter: Arc<AtomicU64>) -> Self {
        Self {
            flags,
            rasterized: counter,
        }
    }

    #[inline]
    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    /// Width of `text` in cells. Never rasterizes.
    #[inline]
    pub fn measure(&self, text: &str) -> u16 {
        text_width(text)
    }

    /// Render `text` into a one-row surface exactly as wide as the text.
    ///
    /// Cells carry `fg` and a transparent background. Empty text yields a
    /// single transparent cell.
    pub fn rasterize(&self, text: &str, fg: PackedRgba) -> Buffer {
        self.rasterized.fetch_add(1, Ordering::Relaxed);
        let mut surface = Buffer::new(self.measure(text).max(1), 1);
        surface.print_text(0, 0, text, Cell::default().with_fg(fg).with_flags(self.flags));
        surface
    }

    /// Draw `text` into `buf` at (`x`, `y`) with this font's style.
    ///
    /// Respects `buf`'s scissor. Returns the column after the last glyph.
    pub fn draw(&self, buf: &mut Buffer, x: u16, y: u16, text: &str, fg: PackedRgba) -> u16 {
        buf.print_text(x, y, text, Cell::default().with_fg(fg).with_flags(self.flags))
    }
}

/// The four fonts of a theme, sharing one rasterization counter.
#[derive(Debug, Clone)]
pub(crate) struct FontSet {
    tab: GlyphFont,
    sub_tab: GlyphFont,
    body: GlyphFont,
    footer: GlyphFont,
    counter: Arc<AtomicU64>,
}

impl FontSet {
    pub(crate) fn new() -> Self {
        let counter = Arc::new(AtomicU64::new(0));
        Self {
            tab: GlyphFont::new(StyleFlags::empty(), Arc::clone(&counter)),
            sub_tab: GlyphFont::new(StyleFlags::empty(), Arc::clone(&counter)),
            body: GlyphFont::new(StyleFlags::empty(), Arc::clone(&counter)),
            footer: GlyphFont::new(StyleFlags::BOLD, Arc::clone(&counter)),
            counter,
        }
    }

    pub(crate) fn get(&self, role: FontRole) -> &GlyphFont {
        match role {
            FontRole::Tab => &self.tab,
            FontRole::SubTab => &self.sub_tab,
            FontRole::Body => &self.body,
            FontRole::Footer => &self.footer,
        }
    }

    pub(crate) fn rasterized(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
