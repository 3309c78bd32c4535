#![forbid(unsafe_code)]

//! crtui demo: a Pip-Boy style terminal driven by the tab engine.

pub mod app;
pub mod cli;
pub mod list;
pub mod logging;
pub mod session;
pub mod tabs;
