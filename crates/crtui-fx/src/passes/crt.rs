#![forbid(unsafe_code)]

//! CRT simulation: scanlines on alternate rows and sparse phosphor noise.

use crate::blend;
use crate::passes::solid_bg;
use crate::rng::FxRng;
use crate::{FxContext, FxError, FxQuality, OverlayPass};
use crtui_render::{Buffer, PackedRgba};

/// Darken every even row.
#[derive(Debug, Clone)]
pub struct ScanlinePass {
    alpha: u8,
}

impl ScanlinePass {
    pub fn new(alpha: u8) -> Self {
        Self { alpha }
    }
}

impl OverlayPass for ScanlinePass {
    fn name(&self) -> &'static str {
        "scanlines"
    }

    fn enabled(&self, quality: FxQuality) -> bool {
        quality >= FxQuality::Minimal
    }

    fn apply(
        &mut self,
        frame: &mut Buffer,
        ctx: &FxContext<'_>,
        _rng: &mut FxRng,
    ) -> Result<(), FxError> {
        let shade = PackedRgba::BLACK.with_alpha(self.alpha);
        let background = ctx.scheme.background;
        for y in (0..frame.height()).step_by(2) {
            for cell in frame.row_cells_mut(y) {
                cell.fg = shade.over(cell.fg);
                cell.bg = shade.over(solid_bg(cell, background));
            }
        }
        Ok(())
    }
}

/// With some probability per frame, add 10 to 50 faint light dots.
#[derive(Debug, Clone)]
pub struct NoisePass {
    chance: f64,
}

impl NoisePass {
    pub const MIN_DOTS: u16 = 10;
    pub const MAX_DOTS: u16 = 50;
    pub const MIN_ALPHA: u16 = 20;
    pub const MAX_ALPHA: u16 = 100;

    pub fn new(chance: f64) -> Self {
        Self { chance }
    }

    /// Sprinkle dots unconditionally.
    pub fn sprinkle(frame: &mut Buffer, ctx: &FxContext<'_>, rng: &mut FxRng) {
        let (w, h) = (frame.width(), frame.height());
        let background = ctx.scheme.background;
        for _ in 0..rng.range_u16(Self::MIN_DOTS, Self::MAX_DOTS) {
            let x = rng.range_u16(0, w - 1);
            let y = rng.range_u16(0, h - 1);
            let alpha = rng.range_u16(Self::MIN_ALPHA, Self::MAX_ALPHA) as u8;
            if let Some(cell) = frame.get_mut(x, y) {
                let bg = solid_bg(cell, background);
                cell.bg = blend::additive(ctx.scheme.light.with_alpha(alpha), bg);
            }
        }
    }
}

impl OverlayPass for NoisePass {
    fn name(&self) -> &'static str {
        "noise"
    }

    fn enabled(&self, quality: FxQuality) -> bool {
        quality >= FxQuality::Full
    }

    fn apply(
        &mut self,
        frame: &mut Buffer,
        ctx: &FxContext<'_>,
        rng: &mut FxRng,
    ) -> Result<(), FxError> {
        if rng.chance(self.chance) {
            Self::sprinkle(frame, ctx, rng);
        }
        Ok(())
    }
}
