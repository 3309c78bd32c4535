#![forbid(unsafe_code)]

//! Footer bar surface for tabs that show status text on the bottom row.
//!
//! The bar is a `Darker` strip split into equal segments, each holding a
//! `Light` label. It is re-rendered only when a segment's text changes.
//! Labels are drawn straight into the bar, so updating a segment from a
//! tab's render never shows up in [`Theme::rasterized`].

use crtui_core::geometry::Rect;
use crtui_render::{Buffer, Cell};
use crtui_style::{ColorRole, FontRole, Theme};

#[derive(Debug, Clone)]
pub struct FooterBar {
    segments: Vec<String>,
    surface: Buffer,
    renders: u64,
}

impl FooterBar {
    pub fn new<I, S>(theme: &Theme, width: u16, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut bar = Self {
            segments: segments.into_iter().map(Into::into).collect(),
            surface: Buffer::new(width.max(1), 1),
            renders: 0,
        };
        bar.render(theme);
        bar
    }

    /// Replace one segment's text. Returns `true` if the surface was
    /// re-rendered.
    pub fn set_segment(&mut self, theme: &Theme, index: usize, text: &str) -> bool {
        match self.segments.get_mut(index) {
            Some(current) if current != text => {
                text.clone_into(current);
                self.render(theme);
                true
            }
            _ => false,
        }
    }

    /// Re-render with the theme's current colours.
    pub fn restyle(&mut self, theme: &Theme) {
        self.render(theme);
    }

    /// Re-render at a new width.
    pub fn resize(&mut self, theme: &Theme, width: u16) {
        let width = width.max(1);
        if width != self.surface.width() {
            self.surface = Buffer::new(width, 1);
            self.render(theme);
        }
    }

    #[inline]
    pub fn surface(&self) -> &Buffer {
        &self.surface
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Times the surface has been rendered.
    #[inline]
    pub fn renders(&self) -> u64 {
        self.renders
    }

    fn render(&mut self, theme: &Theme) {
        let width = self.surface.width();
        self.surface
            .clear_with(Cell::BLANK.with_bg(theme.color(ColorRole::Darker)));
        self.renders += 1;
        if self.segments.is_empty() {
            return;
        }

        let font = theme.font(FontRole::Footer);
        let slot = width / self.segments.len() as u16;
        for (i, text) in self.segments.iter().enumerate() {
            if text.is_empty() || slot < 2 {
                continue;
            }
            let x = slot * i as u16;
            self.surface.push_scissor(Rect::new(x, 0, slot, 1));
            font.draw(&mut self.surface, x + 1, 0, text, theme.color(ColorRole::Light));
            self.surface.pop_scissor();
        }
    }
}
