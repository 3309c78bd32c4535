#![forbid(unsafe_code)]

//! Random glitch bursts: displaced horizontal strips and short line artifacts.

use crate::rng::FxRng;
use crate::{FxContext, FxError, FxQuality, OverlayPass};
use crtui_render::{Buffer, PackedRgba};

/// Largest horizontal strip displacement, in cells.
const MAX_SHIFT: i32 = 3;
/// Tallest strip, in rows.
const MAX_STRIP: u16 = 3;

/// With some probability per frame, run a glitch burst.
#[derive(Debug, Clone)]
pub struct RandomGlitchPass {
    chance: f64,
}

impl RandomGlitchPass {
    pub fn new(chance: f64) -> Self {
        Self { chance }
    }

    /// Run one burst unconditionally: strips, artifacts, or both.
    pub fn burst(frame: &mut Buffer, ctx: &FxContext<'_>, rng: &mut FxRng) {
        let kind = rng.index(3);
        if kind != 1 {
            let intensity = rng.range_u16(3, 8);
            horizontal_glitch(frame, rng, intensity);
        }
        if kind != 0 {
            let count = rng.range_u16(2, 5);
            random_artifacts(frame, rng, count, ctx.scheme.light);
        }
    }
}

impl OverlayPass for RandomGlitchPass {
    fn name(&self) -> &'static str {
        "random_glitch"
    }

    fn enabled(&self, quality: FxQuality) -> bool {
        quality >= FxQuality::Reduced
    }

    fn apply(
        &mut self,
        frame: &mut Buffer,
        ctx: &FxContext<'_>,
        rng: &mut FxRng,
    ) -> Result<(), FxError> {
        if rng.chance(self.chance) {
            tracing::trace!(frame = ctx.frame, "random glitch burst");
            Self::burst(frame, ctx, rng);
        }
        Ok(())
    }
}

/// Shift between 1 and `intensity * 3` short strips sideways by up to
/// three cells.
pub fn horizontal_glitch(frame: &mut Buffer, rng: &mut FxRng, intensity: u16) {
    let height = frame.height();
    let strips = rng.range_u16(1, intensity.saturating_mul(3).max(1));
    for _ in 0..strips {
        let strip = rng.range_u16(1, MAX_STRIP.min(height));
        let y = rng.range_u16(0, height - strip);
        let dx = rng.range_i32(-MAX_SHIFT, MAX_SHIFT);
        frame.shift_span(y, strip, dx);
    }
}

/// Draw between 1 and `count` short line segments in `color`.
pub fn random_artifacts(frame: &mut Buffer, rng: &mut FxRng, count: u16, color: PackedRgba) {
    let (w, h) = (frame.width(), frame.height());
    for _ in 0..rng.range_u16(1, count.max(1)) {
        let x = rng.range_i32(0, w as i32 - 1);
        let y = rng.range_i32(0, h as i32 - 1);
        let dx = rng.range_i32(-MAX_SHIFT, MAX_SHIFT);
        let dy = rng.range_i32(-1, 1);
        let glyph = match (dx.signum(), dy.signum()) {
            (_, 0) => '─',
            (0, _) => '│',
            (sx, sy) if sx == sy => '╲',
            _ => '╱',
        };
        let steps = dx.abs().max(dy.abs()).max(1);
        for i in 0..=steps {
            let cx = x + dx * i / steps;
            let cy = y + dy * i / steps;
            if cx < 0 || cy < 0 {
                continue;
            }
            if let Some(cell) = frame.get_mut(cx as u16, cy as u16) {
                cell.symbol = glyph;
                cell.fg = color;
            }
        }
    }
}
