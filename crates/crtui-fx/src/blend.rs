#![forbid(unsafe_code)]

//! Additive colour blending for glow overlays.

use crtui_render::PackedRgba;

/// Add `top * alpha` to `bottom`, clamped per channel. Brightens.
///
/// The result keeps the larger of the two alphas.
#[inline]
pub fn additive(top: PackedRgba, bottom: PackedRgba) -> PackedRgba {
    let ta = top.a() as f32 / 255.0;
    let add = |t: u8, b: u8| -> u8 { (b as f32 + t as f32 * ta).min(255.0) as u8 };
    PackedRgba::rgba(
        add(top.r(), bottom.r()),
        add(top.g(), bottom.g()),
        add(top.b(), bottom.b()),
        bottom.a().max(top.a()),
    )
}
