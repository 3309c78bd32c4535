#![forbid(unsafe_code)]

//! crtui public facade crate.
//!
//! Re-exports the types an application needs to register tabs, drive a
//! [`TabEngine`], and present its frames, plus a prelude for everyday use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use crtui_core::event::{InputEvent, NavEvent, map_event, map_key};
pub use crtui_core::geometry::{Rect, Sides};

// --- Render re-exports -----------------------------------------------------

pub use crtui_render::presenter::{ColorMode, Presenter};
pub use crtui_render::{Buffer, Cell, Draw, PackedRgba, StyleFlags};

// --- Style re-exports ------------------------------------------------------

pub use crtui_style::{
    ColorRole, ColorScheme, EffectSettings, FontRole, LayoutMetrics, Theme, ThemeBuilder,
    ThemeError,
};

// --- Engine re-exports -----------------------------------------------------

pub use crtui_fx::{FxQuality, Passes};
pub use crtui_tabs::{
    BackgroundTask, Control, EngineError, FooterBar, FrameOutcome, FrameStats, RenderContext,
    StopSignal, TabContent, TabContext, TabEngine, TabRegistry, TabSwitch, TransitionEffect,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for crtui apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while driving the terminal.
    Io(std::io::Error),
    /// Engine startup or registry misuse.
    Engine(EngineError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Engine(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<ThemeError> for Error {
    fn from(err: ThemeError) -> Self {
        Self::Engine(EngineError::InvalidTheme(err))
    }
}

/// Standard result type for crtui APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BackgroundTask, Buffer, Cell, ColorRole, Control, Draw, Error, FrameOutcome, FxQuality,
        NavEvent, Rect, RenderContext, Result, StopSignal, TabContent, TabContext, TabEngine,
        TabRegistry, Theme,
    };

    pub use crate::{core, fx, render, style, tabs};
}

pub use crtui_core as core;
pub use crtui_fx as fx;
pub use crtui_render as render;
pub use crtui_style as style;
pub use crtui_tabs as tabs;
