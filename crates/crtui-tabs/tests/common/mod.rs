//! Shared recording tab for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crtui_render::{Buffer, Cell};
use crtui_style::Theme;
use crtui_tabs::{RenderContext, TabContent, TabContext, TabRegistry};

#[derive(Debug, Clone, Default)]
pub struct Calls {
    pub activations: usize,
    pub deactivations: usize,
    pub task_signals: Vec<bool>,
    pub sub_tabs: Vec<usize>,
    pub renders: usize,
}

pub type Log = Arc<Mutex<Calls>>;

pub fn snapshot(log: &Log) -> Calls {
    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Symbol every recording tab paints across the whole screen.
pub const FILL: char = '▒';

struct Recorder {
    log: Log,
}

impl Recorder {
    fn record(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.log.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

impl TabContent for Recorder {
    fn activate(&mut self) {
        self.record(|c| c.activations += 1);
    }

    fn deactivate(&mut self) {
        self.record(|c| c.deactivations += 1);
    }

    fn render(&mut self, frame: &mut Buffer, _ctx: &RenderContext<'_>) {
        self.record(|c| c.renders += 1);
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                frame.set(x, y, Cell::from_char(FILL));
            }
        }
    }

    fn change_sub_tab(&mut self, index: usize) {
        self.record(|c| c.sub_tabs.push(index));
    }

    fn set_background_task_running(&mut self, running: bool) {
        self.record(|c| c.task_signals.push(running));
    }
}

/// Registry whose tabs record every call.
pub fn recording_registry(tabs: &[(String, Vec<String>)]) -> (TabRegistry, Vec<Log>) {
    let mut registry = TabRegistry::new();
    let mut logs = Vec::with_capacity(tabs.len());
    for (name, subs) in tabs {
        let log = Log::default();
        logs.push(Arc::clone(&log));
        registry
            .register(
                name.clone(),
                move |_: &TabContext| {
                    Box::new(Recorder {
                        log: Arc::clone(&log),
                    }) as Box<dyn TabContent>
                },
                subs.clone(),
            )
            .expect("unique tab names");
    }
    (registry, logs)
}

pub fn layout(tabs: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    tabs.iter()
        .map(|(name, subs)| {
            (
                (*name).to_owned(),
                subs.iter().map(|s| (*s).to_owned()).collect(),
            )
        })
        .collect()
}

/// Deterministic theme with instant glitch sequences.
pub fn test_theme(seed: u64, glitch_chance: f64) -> Theme {
    Theme::builder()
        .with_effects(|fx| {
            fx.seed = Some(seed);
            fx.glitch_move_chance = glitch_chance;
            fx.glitch_frame_interval = Duration::ZERO;
            fx.random_glitches = false;
        })
        .build()
        .expect("valid theme")
}
