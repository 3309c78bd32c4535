#![forbid(unsafe_code)]

//! Theme and layout provider.
//!
//! A [`Theme`] bundles a [`ColorScheme`], the geometry constants in
//! [`LayoutMetrics`], the effect parameters in [`EffectSettings`], and the
//! glyph fonts used to rasterize labels. It is built once, validated, and
//! passed explicitly to every component that needs it.
//!
//! # Example
//! ```
//! use crtui_style::{ColorRole, ColorScheme, Theme};
//!
//! let theme = Theme::builder()
//!     .scheme(ColorScheme::AMBER)
//!     .build()
//!     .expect("default settings are valid");
//! let accent = theme.color(ColorRole::Light);
//! let area = theme.content_rect(80, 24, true);
//! assert!(area.height > 0);
//! # let _ = accent;
//! ```

pub mod font;
pub mod scheme;
pub mod theme;

pub use font::{FontRole, GlyphFont};
pub use scheme::{ColorRole, ColorScheme};
pub use theme::{EffectSettings, LayoutMetrics, Theme, ThemeBuilder, ThemeError};
