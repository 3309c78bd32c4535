#![forbid(unsafe_code)]

//! Theme: colours, geometry, effect settings, fonts.

use std::fmt;
use std::time::Duration;

use crate::font::{FontRole, FontSet, GlyphFont};
use crate::scheme::{ColorRole, ColorScheme};
use crtui_core::geometry::Rect;
use crtui_render::PackedRgba;

/// Invalid theme configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeError {
    /// No preset with this name.
    UnknownScheme(String),
    /// Blur must composite between 2 and 4 copies.
    BlurIterations(usize),
    /// A probability outside `[0, 1]`.
    Probability { name: &'static str, value: f64 },
    /// The glitch sequence needs at least one frame.
    GlitchFrames,
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScheme(name) => {
                write!(f, "unknown color scheme: {name} (available: ")?;
                for (i, n) in ColorScheme::names().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(n)?;
                }
                f.write_str(")")
            }
            Self::BlurIterations(n) => write!(f, "blur needs 2 to 4 radii, got {n}"),
            Self::Probability { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
            Self::GlitchFrames => write!(f, "glitch sequence needs at least one frame"),
        }
    }
}

impl std::error::Error for ThemeError {}

/// Fixed geometry constants, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Horizontal margin on each side of the header.
    pub tab_margin: u16,
    /// How far the active-tab bracket sits outside its label.
    pub tab_bracket_offset: u16,
    /// Label row plus rule row.
    pub header_height: u16,
    pub subtab_bar_height: u16,
    /// Gap between the bars and the content area.
    pub tab_bottom_margin: u16,
    /// Gap between adjacent sub-tab labels.
    pub subtab_spacing: u16,
    pub footer_height: u16,
    /// Gap between the content area and the footer.
    pub footer_margin: u16,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            tab_margin: 2,
            tab_bracket_offset: 1,
            header_height: 2,
            subtab_bar_height: 1,
            tab_bottom_margin: 1,
            subtab_spacing: 2,
            footer_height: 1,
            footer_margin: 0,
        }
    }
}

/// Effect parameters. Probabilities are per event in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    /// Box-blur radius of each additive copy (2 to 4 entries).
    pub blur_radii: Vec<u16>,
    pub blur_alpha: u8,
    pub bloom: bool,
    pub bloom_alpha: u8,
    pub random_glitches: bool,
    /// Chance of a random glitch burst per frame.
    pub random_glitch_chance: f64,
    /// Chance that a tab switch runs a glitch sequence instead of a blur.
    pub glitch_move_chance: f64,
    pub glitch_frame_count: u32,
    pub glitch_frame_interval: Duration,
    pub crt: bool,
    pub scanline_alpha: u8,
    /// Chance of a noise sprinkle per frame.
    pub noise_chance: f64,
    /// RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            blur_radii: vec![1, 2, 3],
            blur_alpha: 180,
            bloom: true,
            bloom_alpha: 10,
            random_glitches: true,
            random_glitch_chance: 0.005,
            glitch_move_chance: 0.6,
            glitch_frame_count: 20,
            glitch_frame_interval: Duration::from_millis(100),
            crt: true,
            scanline_alpha: 30,
            noise_chance: 0.1,
            seed: None,
        }
    }
}

impl EffectSettings {
    /// Check ranges.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if !(2..=4).contains(&self.blur_radii.len()) {
            return Err(ThemeError::BlurIterations(self.blur_radii.len()));
        }
        for (name, value) in [
            ("random_glitch_chance", self.random_glitch_chance),
            ("glitch_move_chance", self.glitch_move_chance),
            ("noise_chance", self.noise_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ThemeError::Probability { name, value });
            }
        }
        if self.glitch_frame_count == 0 {
            return Err(ThemeError::GlitchFrames);
        }
        Ok(())
    }
}

/// Colours, geometry, effect settings, and fonts.
///
/// Cloning shares the font rasterization counter.
#[derive(Debug, Clone)]
pub struct Theme {
    scheme: ColorScheme,
    layout: LayoutMetrics,
    effects: EffectSettings,
    fonts: FontSet,
}

impl Theme {
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder::new()
    }

    #[inline]
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    #[inline]
    pub fn layout(&self) -> &LayoutMetrics {
        &self.layout
    }

    #[inline]
    pub fn effects(&self) -> &EffectSettings {
        &self.effects
    }

    #[inline]
    pub fn color(&self, role: ColorRole) -> PackedRgba {
        self.scheme.color(role)
    }

    #[inline]
    pub fn font(&self, role: FontRole) -> &GlyphFont {
        self.fonts.get(role)
    }

    /// Total rasterizations performed by this theme's fonts.
    pub fn rasterized(&self) -> u64 {
        self.fonts.rasterized()
    }

    /// Same theme with another colour scheme. Fonts and counter are shared.
    pub fn with_scheme(&self, scheme: ColorScheme) -> Self {
        Self {
            scheme,
            ..self.clone()
        }
    }

    /// Area left for tab content on a `screen_w` x `screen_h` screen.
    ///
    /// The top reserve is the header, the sub-tab bar when `has_subtabs`,
    /// and the bottom margin; the bottom reserve is the footer and its
    /// margin. Height saturates at zero on tiny screens.
    pub fn content_rect(&self, screen_w: u16, screen_h: u16, has_subtabs: bool) -> Rect {
        let l = &self.layout;
        let bar = if has_subtabs { l.subtab_bar_height } else { 0 };
        let top = l
            .header_height
            .saturating_add(bar)
            .saturating_add(l.tab_bottom_margin);
        let bottom = l.footer_height.saturating_add(l.footer_margin);
        let height = screen_h.saturating_sub(top).saturating_sub(bottom);
        Rect::new(0, top.min(screen_h), screen_w, height)
    }

    /// Row of the footer bar, `None` if the screen is too short for one.
    pub fn footer_row(&self, screen_h: u16) -> Option<u16> {
        let l = &self.layout;
        (l.footer_height > 0 && screen_h >= l.footer_height).then(|| screen_h - l.footer_height)
    }

    /// Row of the sub-tab bar.
    #[inline]
    pub fn subtab_row(&self) -> u16 {
        self.layout.header_height
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            scheme: ColorScheme::default(),
            layout: LayoutMetrics::default(),
            effects: EffectSettings::default(),
            fonts: FontSet::new(),
        }
    }
}

/// Builder for [`Theme`]; `build` validates the effect settings.
#[derive(Debug, Clone, Default)]
pub struct ThemeBuilder {
    scheme: ColorScheme,
    layout: LayoutMetrics,
    effects: EffectSettings,
}

impl ThemeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Select a preset by name.
    pub fn scheme_name(mut self, name: &str) -> Result<Self, ThemeError> {
        self.scheme = ColorScheme::by_name(name)?;
        Ok(self)
    }

    pub fn layout(mut self, layout: LayoutMetrics) -> Self {
        self.layout = layout;
        self
    }

    pub fn effects(mut self, effects: EffectSettings) -> Self {
        self.effects = effects;
        self
    }

    /// Adjust effect settings in place.
    pub fn with_effects(mut self, f: impl FnOnce(&mut EffectSettings)) -> Self {
        f(&mut self.effects);
        self
    }

    pub fn build(self) -> Result<Theme, ThemeError> {
        self.effects.validate()?;
        Ok(Theme {
            scheme: self.scheme,
            layout: self.layout,
            effects: self.effects,
            fonts: FontSet::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_validates() {
        assert!(Theme::default().effects().validate().is_ok());
        assert!(Theme::builder().build().is_ok());
    }

    #[test]
    fn content_rect_with_and_without_subtabs() {
        let theme = Theme::default();
        // header 2 + subtab 1 + margin 1 = 4; footer 1
        assert_eq!(theme.content_rect(80, 24, true), Rect::new(0, 4, 80, 19));
        assert_eq!(theme.content_rect(80, 24, false), Rect::new(0, 3, 80, 20));
    }

    #[test]
    fn content_rect_saturates_on_tiny_screen() {
        let theme = Theme::default();
        let r = theme.content_rect(10, 3, true);
        assert_eq!(r.height, 0);
        assert_eq!(r.y, 3);
    }

    #[test]
    fn footer_row_is_last_line() {
        let theme = Theme::default();
        assert_eq!(theme.footer_row(24), Some(23));
        let no_footer = Theme::builder()
            .layout(LayoutMetrics {
                footer_height: 0,
                ..LayoutMetrics::default()
            })
            .build()
            .unwrap();
        assert_eq!(no_footer.footer_row(24), None);
    }

    #[test]
    fn blur_radii_count_is_checked() {
        let err = Theme::builder()
            .with_effects(|e| e.blur_radii = vec![1])
            .build()
            .unwrap_err();
        assert_eq!(err, ThemeError::BlurIterations(1));

        let err = Theme::builder()
            .with_effects(|e| e.blur_radii = vec![1, 2, 3, 4, 5])
            .build()
            .unwrap_err();
        assert_eq!(err, ThemeError::BlurIterations(5));
    }

    #[test]
    fn probabilities_are_checked() {
        let err = Theme::builder()
            .with_effects(|e| e.glitch_move_chance = 1.5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ThemeError::Probability {
                name: "glitch_move_chance",
                ..
            }
        ));
    }

    #[test]
    fn zero_glitch_frames_rejected() {
        let err = Theme::builder()
            .with_effects(|e| e.glitch_frame_count = 0)
            .build()
            .unwrap_err();
        assert_eq!(err, ThemeError::GlitchFrames);
    }

    #[test]
    fn unknown_scheme_message_lists_presets() {
        let err = Theme::builder().scheme_name("sepia").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sepia"));
        assert!(msg.contains("classic_green"));
    }

    #[test]
    fn with_scheme_shares_counter() {
        let theme = Theme::default();
        let amber = theme.with_scheme(ColorScheme::AMBER);
        amber.font(FontRole::Tab).rasterize("x", PackedRgba::WHITE);
        assert_eq!(theme.rasterized(), 1);
        assert_eq!(amber.color(ColorRole::Light), ColorScheme::AMBER.light);
    }
}
