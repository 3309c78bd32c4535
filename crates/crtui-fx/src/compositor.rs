#![forbid(unsafe_code)]

//! Effect compositor: the fixed per-frame pass pipeline.

use crate::passes::{BloomPass, BlurPass, NoisePass, RandomGlitchPass, ScanlinePass};
use crate::rng::FxRng;
use crate::{FxContext, FxQuality, OverlayPass};
use crtui_render::Buffer;
use crtui_style::{ColorScheme, EffectSettings};

bitflags::bitflags! {
    /// Passes that ran on a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Passes: u8 {
        const BLUR          = 0b0000_0001;
        const BLOOM         = 0b0000_0010;
        const RANDOM_GLITCH = 0b0000_0100;
        const SCANLINES     = 0b0000_1000;
        const NOISE         = 0b0001_0000;
    }
}

/// Transition effect picked for one tab switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionChoice {
    /// Blur the next composed frame.
    Blur,
    /// Run a glitch sequence instead.
    GlitchSequence,
}

struct Layer {
    pass: Box<dyn OverlayPass>,
    flag: Passes,
}

/// Applies the transition blur and the persistent passes in fixed order.
pub struct EffectCompositor {
    blur: BlurPass,
    layers: Vec<Layer>,
    blur_pending: bool,
    glitch_move_chance: f64,
    quality: FxQuality,
    rng: FxRng,
    frame: u64,
}

impl EffectCompositor {
    /// Build the pipeline. Disabled settings leave their pass out entirely.
    pub fn new(settings: &EffectSettings, quality: FxQuality) -> Self {
        let mut layers = Vec::with_capacity(4);
        if settings.bloom {
            layers.push(Layer {
                pass: Box::new(BloomPass::new(settings.bloom_alpha)),
                flag: Passes::BLOOM,
            });
        }
        if settings.random_glitches {
            layers.push(Layer {
                pass: Box::new(RandomGlitchPass::new(settings.random_glitch_chance)),
                flag: Passes::RANDOM_GLITCH,
            });
        }
        if settings.crt {
            layers.push(Layer {
                pass: Box::new(ScanlinePass::new(settings.scanline_alpha)),
                flag: Passes::SCANLINES,
            });
            layers.push(Layer {
                pass: Box::new(NoisePass::new(settings.noise_chance)),
                flag: Passes::NOISE,
            });
        }
        Self {
            blur: BlurPass::new(settings.blur_radii.clone(), settings.blur_alpha),
            layers,
            blur_pending: false,
            glitch_move_chance: settings.glitch_move_chance,
            quality,
            rng: FxRng::from_option(settings.seed),
            frame: 0,
        }
    }

    #[inline]
    pub fn quality(&self) -> FxQuality {
        self.quality
    }

    pub fn set_quality(&mut self, quality: FxQuality) {
        self.quality = quality;
    }

    #[inline]
    pub fn blur_pending(&self) -> bool {
        self.blur_pending
    }

    /// Queue a blur for the next frame.
    pub fn request_blur(&mut self) {
        self.blur_pending = true;
    }

    /// Frames processed so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Pick the effect for a tab switch with a single probability draw.
    ///
    /// A blur choice is queued here; a glitch choice is left for the caller
    /// to start. Returns `None` below [`FxQuality::Reduced`], where only
    /// persistent overlays run and no draw is made.
    pub fn choose_transition(&mut self) -> Option<TransitionChoice> {
        if self.quality < FxQuality::Reduced {
            return None;
        }
        if self.rng.chance(self.glitch_move_chance) {
            Some(TransitionChoice::GlitchSequence)
        } else {
            self.blur_pending = true;
            Some(TransitionChoice::Blur)
        }
    }

    /// Run the pipeline over a fully composed frame.
    ///
    /// Order: pending blur, bloom, random glitch, scanlines, noise. A pass
    /// that fails is skipped for this frame. The pending blur is cleared
    /// whether or not it could run.
    pub fn apply(&mut self, frame: &mut Buffer, scheme: &ColorScheme) -> Passes {
        let ctx = FxContext {
            scheme,
            quality: self.quality,
            frame: self.frame,
        };
        self.frame = self.frame.wrapping_add(1);
        let mut ran = Passes::empty();

        if std::mem::take(&mut self.blur_pending) && self.blur.enabled(ctx.quality) {
            match self.blur.apply(frame, &ctx, &mut self.rng) {
                Ok(()) => ran |= Passes::BLUR,
                Err(err) => {
                    tracing::debug!(pass = self.blur.name(), error = %err, "effect pass skipped");
                }
            }
        }

        for layer in &mut self.layers {
            if !layer.pass.enabled(ctx.quality) {
                continue;
            }
            match layer.pass.apply(frame, &ctx, &mut self.rng) {
                Ok(()) => ran |= layer.flag,
                Err(err) => {
                    tracing::debug!(pass = layer.pass.name(), error = %err, "effect pass skipped");
                }
            }
        }
        ran
    }
}

impl std::fmt::Debug for EffectCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectCompositor")
            .field("layers", &self.layers.iter().map(|l| l.pass.name()).collect::<Vec<_>>())
            .field("blur_pending", &self.blur_pending)
            .field("quality", &self.quality)
            .field("frame", &self.frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtui_render::{Cell, PackedRgba};

    fn settings() -> EffectSettings {
        EffectSettings {
            seed: Some(77),
            ..EffectSettings::default()
        }
    }

    fn black_frame(w: u16, h: u16) -> Buffer {
        let mut frame = Buffer::new(w, h);
        frame.clear_with(Cell::BLANK.with_bg(PackedRgba::BLACK));
        frame
    }

    #[test]
    fn blur_runs_once_then_clears() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Full);
        let scheme = ColorScheme::default();
        let mut frame = black_frame(10, 5);
        fx.request_blur();
        assert!(fx.apply(&mut frame, &scheme).contains(Passes::BLUR));
        assert!(!fx.blur_pending());
        assert!(!fx.apply(&mut frame, &scheme).contains(Passes::BLUR));
    }

    #[test]
    fn persistent_passes_run_every_frame() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Full);
        let ran = fx.apply(&mut black_frame(10, 5), &ColorScheme::default());
        assert!(ran.contains(Passes::BLOOM | Passes::RANDOM_GLITCH | Passes::SCANLINES | Passes::NOISE));
    }

    #[test]
    fn minimal_quality_runs_scanlines_only() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Minimal);
        fx.request_blur();
        let ran = fx.apply(&mut black_frame(10, 5), &ColorScheme::default());
        assert_eq!(ran, Passes::SCANLINES);
        assert!(!fx.blur_pending());
    }

    #[test]
    fn off_quality_runs_nothing_and_picks_no_transition() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Off);
        let mut frame = black_frame(10, 5);
        let before = frame.clone();
        assert_eq!(fx.apply(&mut frame, &ColorScheme::default()), Passes::empty());
        assert_eq!(frame, before);
        assert_eq!(fx.choose_transition(), None);
    }

    #[test]
    fn minimal_quality_never_starts_a_transition() {
        let always = EffectSettings {
            glitch_move_chance: 1.0,
            ..settings()
        };
        let mut fx = EffectCompositor::new(&always, FxQuality::Minimal);
        assert!((0..50).all(|_| fx.choose_transition().is_none()));
        assert!(!fx.blur_pending());

        fx.set_quality(FxQuality::Reduced);
        assert_eq!(fx.choose_transition(), Some(TransitionChoice::GlitchSequence));
    }

    #[test]
    fn disabled_settings_drop_passes() {
        let s = EffectSettings {
            bloom: false,
            crt: false,
            random_glitches: false,
            ..settings()
        };
        let mut fx = EffectCompositor::new(&s, FxQuality::Full);
        assert_eq!(fx.apply(&mut black_frame(4, 4), &ColorScheme::default()), Passes::empty());
    }

    #[test]
    fn failing_blur_is_skipped_and_frame_continues() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Full);
        fx.request_blur();
        let ran = fx.apply(&mut black_frame(10, 1), &ColorScheme::default());
        assert!(!ran.contains(Passes::BLUR));
        assert!(ran.contains(Passes::SCANLINES));
        assert!(!fx.blur_pending());
    }

    #[test]
    fn transition_choice_is_exclusive() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Full);
        for _ in 0..200 {
            fx.apply(&mut black_frame(4, 4), &ColorScheme::default());
            match fx.choose_transition() {
                Some(TransitionChoice::Blur) => assert!(fx.blur_pending()),
                Some(TransitionChoice::GlitchSequence) => assert!(!fx.blur_pending()),
                None => unreachable!("quality is Full"),
            }
        }
    }

    #[test]
    fn glitch_chance_extremes() {
        let always = EffectSettings {
            glitch_move_chance: 1.0,
            ..settings()
        };
        let mut fx = EffectCompositor::new(&always, FxQuality::Full);
        assert!((0..50).all(|_| fx.choose_transition() == Some(TransitionChoice::GlitchSequence)));

        let never = EffectSettings {
            glitch_move_chance: 0.0,
            ..settings()
        };
        let mut fx = EffectCompositor::new(&never, FxQuality::Full);
        assert!((0..50).all(|_| fx.choose_transition() == Some(TransitionChoice::Blur)));
    }

    #[test]
    fn frame_counter_advances() {
        let mut fx = EffectCompositor::new(&settings(), FxQuality::Full);
        let scheme = ColorScheme::default();
        for _ in 0..3 {
            fx.apply(&mut black_frame(2, 2), &scheme);
        }
        assert_eq!(fx.frames(), 3);
    }
}
