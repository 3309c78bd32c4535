#![forbid(unsafe_code)]

//! Tracing setup.
//!
//! The terminal belongs to the frame presenter, so logs only ever go to a
//! file. Without a log file no subscriber is installed.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a file-backed subscriber if `path` is set.
///
/// Returns `Ok(false)` when no file was requested or a subscriber was
/// already installed.
pub fn init(path: Option<&Path>) -> io::Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(path = %path.display(), "logging to file");
    }
    Ok(installed)
}
