//! Recording tab content for unit tests.

use std::sync::{Arc, Mutex, PoisonError};

use crtui_core::geometry::Rect;
use crtui_render::{Buffer, Cell};
use crtui_style::Theme;

use crate::content::{RenderContext, TabContent, TabContext};
use crate::registry::TabRegistry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeCalls {
    pub activations: usize,
    pub deactivations: usize,
    pub task_signals: Vec<bool>,
    pub sub_tabs: Vec<usize>,
    pub scrolls: Vec<bool>,
    pub selects: usize,
    pub navigations: Vec<i32>,
    pub renders: usize,
    pub last_area: Option<Rect>,
    pub last_sub_tab: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ProbeLog(Arc<Mutex<ProbeCalls>>);

impl ProbeLog {
    pub fn snapshot(&self) -> ProbeCalls {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn with(&self, f: impl FnOnce(&mut ProbeCalls)) {
        f(&mut self.0.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

/// Records every call and paints the whole screen with `fill` on render.
#[derive(Debug, Default)]
pub struct Probe {
    log: ProbeLog,
    fill: Option<char>,
    footer: Option<Buffer>,
}

impl Probe {
    pub fn with_log(log: ProbeLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn fill(mut self, symbol: char) -> Self {
        self.fill = Some(symbol);
        self
    }

    pub fn footer(mut self, footer: Buffer) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn log(&self) -> ProbeLog {
        self.log.clone()
    }
}

impl TabContent for Probe {
    fn activate(&mut self) {
        self.log.with(|c| c.activations += 1);
    }

    fn deactivate(&mut self) {
        self.log.with(|c| c.deactivations += 1);
    }

    fn render(&mut self, frame: &mut Buffer, ctx: &RenderContext<'_>) {
        self.log.with(|c| {
            c.renders += 1;
            c.last_area = Some(ctx.area);
            c.last_sub_tab = Some(ctx.sub_tab);
        });
        if let Some(symbol) = self.fill {
            for y in 0..frame.height() {
                for x in 0..frame.width() {
                    frame.set(x, y, Cell::from_char(symbol));
                }
            }
        }
    }

    fn scroll(&mut self, forward: bool) {
        self.log.with(|c| c.scrolls.push(forward));
    }

    fn select(&mut self) {
        self.log.with(|c| c.selects += 1);
    }

    fn change_sub_tab(&mut self, index: usize) {
        self.log.with(|c| c.sub_tabs.push(index));
    }

    fn set_background_task_running(&mut self, running: bool) {
        self.log.with(|c| c.task_signals.push(running));
    }

    fn navigate(&mut self, direction: i32) {
        self.log.with(|c| c.navigations.push(direction));
    }

    fn footer(&self) -> Option<&Buffer> {
        self.footer.as_ref()
    }
}

pub fn probe_context(name: &str) -> TabContext {
    TabContext {
        name: name.to_owned(),
        index: 0,
        sub_tabs: Vec::new(),
        theme: Arc::new(Theme::default()),
        area: Rect::from_size(80, 24),
        screen_width: 80,
        screen_height: 24,
    }
}

/// Registry of probes; each tab paints its own fill symbol.
pub fn probe_registry(tabs: &[(&str, &[&str])]) -> (TabRegistry, Vec<ProbeLog>) {
    let mut registry = TabRegistry::new();
    let mut logs = Vec::new();
    for (i, (name, subs)) in tabs.iter().enumerate() {
        let log = ProbeLog::default();
        logs.push(log.clone());
        let symbol = char::from(b'0' + (i % 10) as u8);
        registry
            .register(
                *name,
                move |_ctx: &TabContext| {
                    Box::new(Probe::with_log(log.clone()).fill(symbol)) as Box<dyn TabContent>
                },
                subs.iter().copied(),
            )
            .unwrap();
    }
    (registry, logs)
}
