#![forbid(unsafe_code)]

//! Bloom: a faint wash of the phosphor colour over the whole frame.

use crate::rng::FxRng;
use crate::{FxContext, FxError, FxQuality, OverlayPass};
use crtui_render::Buffer;

#[derive(Debug, Clone)]
pub struct BloomPass {
    alpha: u8,
}

impl BloomPass {
    pub fn new(alpha: u8) -> Self {
        Self { alpha }
    }
}

impl OverlayPass for BloomPass {
    fn name(&self) -> &'static str {
        "bloom"
    }

    fn enabled(&self, quality: FxQuality) -> bool {
        quality >= FxQuality::Reduced
    }

    fn apply(
        &mut self,
        frame: &mut Buffer,
        ctx: &FxContext<'_>,
        _rng: &mut FxRng,
    ) -> Result<(), FxError> {
        let wash = ctx.scheme.light.with_alpha(self.alpha);
        let background = ctx.scheme.background;
        for cell in frame.cells_mut() {
            cell.bg = wash.over(cell.bg.over(background));
            cell.fg = wash.over(cell.fg);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtui_render::{Cell, PackedRgba};
    use crtui_style::ColorScheme;

    #[test]
    fn bloom_tints_background_toward_light() {
        let scheme = ColorScheme::AMBER;
        let ctx = FxContext {
            scheme: &scheme,
            quality: FxQuality::Full,
            frame: 0,
        };
        let mut frame = Buffer::new(2, 2);
        frame.clear_with(Cell::BLANK.with_bg(PackedRgba::BLACK));
        BloomPass::new(10).apply(&mut frame, &ctx, &mut FxRng::new(1)).unwrap();
        let bg = frame.get(0, 0).unwrap().bg;
        assert!(bg.r() > 0 && bg.r() < 20);
        assert_eq!(bg.a(), 255);
    }

    #[test]
    fn bloom_resolves_transparent_background() {
        let scheme = ColorScheme::CLASSIC_GREEN;
        let ctx = FxContext {
            scheme: &scheme,
            quality: FxQuality::Reduced,
            frame: 0,
        };
        let mut frame = Buffer::new(1, 1);
        BloomPass::new(10).apply(&mut frame, &ctx, &mut FxRng::new(1)).unwrap();
        assert_eq!(frame.get(0, 0).unwrap().bg.a(), 255);
    }
}
