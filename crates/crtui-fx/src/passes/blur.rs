#![forbid(unsafe_code)]

//! Transition blur: progressively wider box blurs added back onto the frame.

use crate::blend;
use crate::passes::{emission, solid_bg};
use crate::rng::FxRng;
use crate::{FxContext, FxError, FxQuality, OverlayPass};
use crtui_render::{Buffer, PackedRgba};

/// Composite one blurred, partially transparent copy of the frame per
/// radius, additively, onto the cell backgrounds.
///
/// Scratch storage grows to the largest frame seen and is reused.
#[derive(Debug, Clone)]
pub struct BlurPass {
    radii: Vec<u16>,
    alpha: u8,
    source: Vec<PackedRgba>,
    scratch: Vec<PackedRgba>,
    blurred: Vec<PackedRgba>,
}

impl BlurPass {
    pub fn new(radii: Vec<u16>, alpha: u8) -> Self {
        Self {
            radii,
            alpha,
            source: Vec::new(),
            scratch: Vec::new(),
            blurred: Vec::new(),
        }
    }

    /// Number of blurred copies composited per application.
    pub fn copies(&self) -> usize {
        self.radii.len()
    }
}

impl OverlayPass for BlurPass {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn enabled(&self, quality: FxQuality) -> bool {
        quality >= FxQuality::Full
    }

    fn apply(
        &mut self,
        frame: &mut Buffer,
        ctx: &FxContext<'_>,
        _rng: &mut FxRng,
    ) -> Result<(), FxError> {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        if w < 2 || h < 2 {
            return Err(FxError::Unsupported("blur needs at least 2x2 cells"));
        }
        let background = ctx.scheme.background;

        self.source.clear();
        self.source
            .extend(frame.cells().iter().map(|c| emission(c, background)));

        for &radius in &self.radii {
            box_blur(
                &self.source,
                w,
                h,
                radius as usize,
                &mut self.scratch,
                &mut self.blurred,
            );
            for (cell, glow) in frame.cells_mut().iter_mut().zip(&self.blurred) {
                let bg = solid_bg(cell, background);
                cell.bg = blend::additive(glow.with_alpha(self.alpha), bg);
            }
        }
        Ok(())
    }
}

/// Separable box blur of a `w` x `h` colour grid, edges clamped.
///
/// `scratch` and `out` are resized to `w * h`.
pub fn box_blur(
    src: &[PackedRgba],
    w: usize,
    h: usize,
    radius: usize,
    scratch: &mut Vec<PackedRgba>,
    out: &mut Vec<PackedRgba>,
) {
    scratch.resize(w * h, PackedRgba::TRANSPARENT);
    out.resize(w * h, PackedRgba::TRANSPARENT);

    for y in 0..h {
        for x in 0..w {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(w - 1);
            scratch[y * w + x] = average((lo..=hi).map(|sx| src[y * w + sx]));
        }
    }
    for y in 0..h {
        let lo = y.saturating_sub(radius);
        let hi = (y + radius).min(h - 1);
        for x in 0..w {
            out[y * w + x] = average((lo..=hi).map(|sy| scratch[sy * w + x]));
        }
    }
}

#[inline]
fn average(colors: impl Iterator<Item = PackedRgba>) -> PackedRgba {
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for c in colors {
        r += c.r() as u32;
        g += c.g() as u32;
        b += c.b() as u32;
        n += 1;
    }
    let n = n.max(1);
    PackedRgba::rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
}
