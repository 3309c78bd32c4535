#![forbid(unsafe_code)]

//! Engine errors.
//!
//! Every variant is a startup or programmer error surfaced at the call
//! site. Optional effects that cannot run never produce an `EngineError`;
//! they are skipped inside the frame.

use std::fmt;

use crtui_style::ThemeError;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine was started with an empty registry.
    NoTabs,
    /// The theme failed validation at startup.
    InvalidTheme(ThemeError),
    /// No tab with this name is registered.
    UnknownTab(String),
    /// A tab with this name is already registered.
    DuplicateName(String),
    /// Registration attempted after the engine started.
    AlreadyRunning(String),
}

impl EngineError {
    /// Configuration problems found while starting the engine.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoTabs | Self::InvalidTheme(_))
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTabs => write!(f, "no tabs registered; register at least one before starting"),
            Self::InvalidTheme(err) => write!(f, "invalid theme: {err}"),
            Self::UnknownTab(name) => write!(f, "unknown tab: {name}"),
            Self::DuplicateName(name) => write!(f, "tab already registered: {name}"),
            Self::AlreadyRunning(name) => {
                write!(f, "cannot register {name}: engine is already running")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTheme(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ThemeError> for EngineError {
    fn from(err: ThemeError) -> Self {
        Self::InvalidTheme(err)
    }
}
