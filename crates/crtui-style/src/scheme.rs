#![forbid(unsafe_code)]

//! Phosphor colour schemes.

use crate::theme::ThemeError;
use crtui_render::PackedRgba;

/// Semantic colour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Screen fill.
    Background,
    /// Brightest phosphor: active labels, highlights, bloom.
    Light,
    /// Inactive header labels.
    Middle,
    /// Footer strips and dim furniture.
    Darker,
    /// Inactive sub-tab labels.
    Dark,
}

/// Five-slot monochrome palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: &'static str,
    pub background: PackedRgba,
    pub light: PackedRgba,
    pub middle: PackedRgba,
    pub darker: PackedRgba,
    pub dark: PackedRgba,
}

impl ColorScheme {
    pub const CLASSIC_GREEN: Self = Self::ramp("classic_green", 0, 255, 0);
    pub const AMBER: Self = Self::ramp("amber", 255, 191, 0);
    pub const BLUE: Self = Self::ramp("blue", 0, 191, 255);
    pub const WHITE: Self = Self::ramp("white", 255, 255, 255);

    /// Built-in schemes, default first.
    pub const PRESETS: [Self; 4] = [Self::CLASSIC_GREEN, Self::AMBER, Self::BLUE, Self::WHITE];

    /// Black background with the phosphor colour at 100/75/50/25 percent.
    const fn ramp(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        const fn scale(c: u8, quarters: u16) -> u8 {
            ((c as u16 * quarters) / 4) as u8
        }
        Self {
            name,
            background: PackedRgba::BLACK,
            light: PackedRgba::rgb(r, g, b),
            middle: PackedRgba::rgb(scale(r, 3), scale(g, 3), scale(b, 3)),
            darker: PackedRgba::rgb(scale(r, 2), scale(g, 2), scale(b, 2)),
            dark: PackedRgba::rgb(scale(r, 1), scale(g, 1), scale(b, 1)),
        }
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Result<Self, ThemeError> {
        Self::PRESETS
            .iter()
            .find(|s| s.name == name)
            .copied()
            .ok_or_else(|| ThemeError::UnknownScheme(name.to_owned()))
    }

    /// Preset names in order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::PRESETS.iter().map(|s| s.name)
    }

    /// The preset after this one, wrapping around.
    pub fn next_preset(&self) -> Self {
        let idx = Self::PRESETS
            .iter()
            .position(|s| s.name == self.name)
            .map_or(0, |i| (i + 1) % Self::PRESETS.len());
        Self::PRESETS[idx]
    }

    #[inline]
    pub const fn color(&self, role: ColorRole) -> PackedRgba {
        match role {
            ColorRole::Background => self.background,
            ColorRole::Light => self.light,
            ColorRole::Middle => self.middle,
            ColorRole::Darker => self.darker,
            ColorRole::Dark => self.dark,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::CLASSIC_GREEN
    }
}
