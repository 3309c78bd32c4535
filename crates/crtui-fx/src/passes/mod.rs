#![forbid(unsafe_code)]

//! Overlay passes.
//!
//! | Pass | Runs at | Trigger |
//! |------|---------|---------|
//! | [`BlurPass`] | `Full` | one frame after a tab switch |
//! | [`BloomPass`] | `Reduced`+ | every frame |
//! | [`RandomGlitchPass`] | `Reduced`+ | per-frame probability |
//! | [`ScanlinePass`] | `Minimal`+ | every frame |
//! | [`NoisePass`] | `Full` | per-frame probability |

mod bloom;
mod blur;
mod crt;
mod glitch;

pub use bloom::BloomPass;
pub use blur::{BlurPass, box_blur};
pub use crt::{NoisePass, ScanlinePass};
pub use glitch::{RandomGlitchPass, horizontal_glitch, random_artifacts};

use crtui_render::{Cell, PackedRgba};

/// Opaque colour a cell emits: its glyph colour when it shows one,
/// otherwise its background (transparent reads as `fallback`).
#[inline]
pub(crate) fn emission(cell: &Cell, fallback: PackedRgba) -> PackedRgba {
    if cell.symbol != ' ' && !cell.is_continuation() {
        cell.fg.with_alpha(255)
    } else if cell.bg.a() == 0 {
        fallback
    } else {
        cell.bg.over(fallback)
    }
}

/// Background with transparency resolved against `fallback`.
#[inline]
pub(crate) fn solid_bg(cell: &Cell, fallback: PackedRgba) -> PackedRgba {
    cell.bg.over(fallback)
}
