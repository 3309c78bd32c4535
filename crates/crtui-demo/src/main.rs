#![forbid(unsafe_code)]

//! crtui demo binary entry point.

use crtui_demo::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        tracing::error!(error = %e, "demo failed");
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
