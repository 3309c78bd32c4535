#![forbid(unsafe_code)]

//! Frame loop: poll input, feed the engine, compose, present.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self as cte, KeyCode, KeyEventKind};
use crtui::{
    ColorMode, Control, FxQuality, InputEvent, Presenter, TabEngine, TabRegistry, map_event,
};

use crate::cli::Opts;
use crate::session::TerminalSession;
use crate::tabs;

/// Run the demo until the user quits.
pub fn run(opts: &Opts) -> crtui::Result<()> {
    let theme = opts.theme()?;
    let mode = ColorMode::detect();
    let quality = FxQuality::for_truecolor(mode == ColorMode::TrueColor);

    let mut registry = TabRegistry::new();
    tabs::register_all(&mut registry)?;

    let session = TerminalSession::enter()?;
    let (width, height) = session.size()?;
    let mut engine = TabEngine::start(&mut registry, theme, width, height, quality)?;
    let mut presenter = Presenter::new(io::stdout(), mode);
    tracing::info!(?mode, ?quality, fps = opts.fps, "demo running");

    let frame_time = Duration::from_secs(1) / opts.fps;
    let exit_at = (opts.exit_after_ms > 0)
        .then(|| Instant::now() + Duration::from_millis(opts.exit_after_ms));

    'frames: loop {
        let tick = Instant::now();
        engine.render_frame();
        engine.with_frame(|frame| presenter.present(frame))?;

        if exit_at.is_some_and(|at| Instant::now() >= at) {
            break;
        }

        // Drain input until the next frame is due.
        loop {
            let remaining = frame_time.saturating_sub(tick.elapsed());
            if remaining.is_zero() || !cte::poll(remaining)? {
                break;
            }
            let event = cte::read()?;
            if is_scheme_key(&event) {
                let next = engine.theme().scheme().next_preset();
                engine.set_color_scheme(next);
                continue;
            }
            match map_event(event) {
                Some(InputEvent::Nav(nav)) => {
                    if engine.handle(nav) == Control::Quit {
                        break 'frames;
                    }
                }
                Some(InputEvent::Resize { width, height }) => {
                    engine.resize(width, height);
                    presenter.invalidate();
                }
                None => {}
            }
        }
    }

    let stats = engine.frame_stats();
    tracing::info!(
        composed = stats.composed,
        held = stats.held,
        last_frame_us = stats.last_frame.as_micros() as u64,
        "demo finished"
    );
    engine.shutdown();
    drop(session);
    Ok(())
}

fn is_scheme_key(event: &cte::Event) -> bool {
    matches!(
        event,
        cte::Event::Key(key)
            if key.kind != KeyEventKind::Release && key.code == KeyCode::Char('c')
                && key.modifiers.is_empty()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn scheme_key_is_plain_c() {
        let press = cte::Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        let ctrl_c = cte::Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let other = cte::Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(is_scheme_key(&press));
        assert!(!is_scheme_key(&ctrl_c));
        assert!(!is_scheme_key(&other));
    }
}
