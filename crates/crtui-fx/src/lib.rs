#![forbid(unsafe_code)]

//! Frame effects.
//!
//! Effects run after the frame is fully composed. The
//! [`compositor::EffectCompositor`] applies its passes in a fixed order:
//!
//! 1. transition blur (only when one is pending)
//! 2. bloom wash
//! 3. random glitch burst
//! 4. scanlines and noise
//!
//! A tab switch instead may start a [`sequence::GlitchSequence`], a short
//! run of vertical-jitter frames on its own thread that owns the frame
//! buffer while it runs.
//!
//! # Degradation
//!
//! Passes are gated by [`FxQuality`]. A pass that cannot run on the current
//! frame returns an [`FxError`]; the compositor skips it and keeps going.
//!
//! # Determinism
//!
//! All randomness flows through [`rng::FxRng`], so a fixed seed reproduces
//! the same effects frame for frame.

pub mod blend;
pub mod compositor;
pub mod passes;
pub mod rng;
pub mod sequence;

use std::fmt;

use crtui_render::Buffer;
use crtui_style::ColorScheme;

pub use compositor::{EffectCompositor, Passes, TransitionChoice};
pub use rng::FxRng;
pub use sequence::GlitchSequence;

/// Effect fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum FxQuality {
    /// No effects at all.
    Off,
    /// Scanlines only.
    Minimal,
    /// Everything except blur and noise.
    Reduced,
    #[default]
    Full,
}

impl FxQuality {
    /// Pick a level from whether the terminal blends 24-bit colour.
    pub fn for_truecolor(truecolor: bool) -> Self {
        if truecolor { Self::Full } else { Self::Minimal }
    }
}

/// Why a pass did not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    /// The frame cannot support this effect.
    Unsupported(&'static str),
    /// Cached pass state does not match the frame size.
    SizeMismatch {
        expected: (u16, u16),
        actual: (u16, u16),
    },
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(why) => write!(f, "effect unsupported: {why}"),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "effect sized for {}x{}, frame is {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl std::error::Error for FxError {}

/// Per-frame inputs shared by every pass.
#[derive(Debug, Clone, Copy)]
pub struct FxContext<'a> {
    pub scheme: &'a ColorScheme,
    pub quality: FxQuality,
    /// Monotonic frame counter.
    pub frame: u64,
}

/// One overlay pass over the composed frame.
pub trait OverlayPass: Send {
    /// Stable name for logs.
    fn name(&self) -> &'static str;

    /// Whether the pass runs at `quality`.
    fn enabled(&self, quality: FxQuality) -> bool;

    /// Mutate `frame` in place.
    fn apply(&mut self, frame: &mut Buffer, ctx: &FxContext<'_>, rng: &mut FxRng)
    -> Result<(), FxError>;
}
