#![forbid(unsafe_code)]

//! RADIO: station list and a signal scope animated by a background task.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crtui::render::BorderChars;
use crtui::{
    BackgroundTask, Buffer, Cell, ColorRole, Draw, Rect, RenderContext, Sides, StopSignal,
    TabContent, TabContext,
};

use super::body;
use crate::list::ScrollList;

const FRAME: Duration = Duration::from_millis(60);
const LIST_WIDTH: u16 = 28;

pub struct RadioTab {
    stations: ScrollList,
    tuned: Option<usize>,
    phase: Arc<AtomicU32>,
    task: BackgroundTask,
}

impl RadioTab {
    pub fn new(_ctx: &TabContext) -> Self {
        let phase = Arc::new(AtomicU32::new(0));
        let shared = Arc::clone(&phase);
        let task = BackgroundTask::new("radio-signal", move |stop: StopSignal| {
            while !stop.wait_timeout(FRAME) {
                shared.fetch_add(1, Ordering::Relaxed);
            }
        });
        Self {
            stations: ScrollList::new([
                "Classical Radio",
                "Diamond City Radio",
                "Distress Signal",
                "Freedom Radio",
                "Military Frequency AF95",
            ]),
            tuned: None,
            phase,
            task,
        }
    }

    pub fn tuned(&self) -> Option<usize> {
        self.tuned
    }

    fn draw_scope(&self, frame: &mut Buffer, area: Rect, ctx: &RenderContext<'_>) {
        if area.is_empty() {
            return;
        }
        let edge = Cell::BLANK.with_fg(ctx.theme.color(ColorRole::Dark));
        frame.draw_border(area, BorderChars::SQUARE, edge);

        let inner = area.inner(Sides::all(1));
        if inner.is_empty() {
            return;
        }
        let mid = inner.y + inner.height / 2;
        let trace = Cell::from_char('•').with_fg(ctx.theme.color(ColorRole::Light));
        if self.tuned.is_none() {
            frame.draw_horizontal_line(inner.x, mid, inner.width, trace.with_char('─'));
            return;
        }
        let phase = self.phase.load(Ordering::Relaxed) as f64;
        let amplitude = f64::from(inner.height.saturating_sub(1)) / 2.0;
        for dx in 0..inner.width {
            let t = (f64::from(dx) + phase) * 0.35;
            let offset = (amplitude * t.sin() * (t * 0.23).cos()).round() as i32;
            let y = i32::from(mid) + offset;
            if let Ok(y) = u16::try_from(y) {
                frame.set(inner.x + dx, y, trace);
            }
        }
    }
}

impl TabContent for RadioTab {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn render(&mut self, frame: &mut Buffer, ctx: &RenderContext<'_>) {
        let area = body(ctx.area);
        let list_width = LIST_WIDTH.min(area.width);
        self.stations.render(
            frame,
            Rect::new(area.x, area.y, list_width, area.height),
            ctx.theme,
        );
        let scope = Rect::new(
            area.x + list_width + 2,
            area.y,
            area.width.saturating_sub(list_width + 2),
            area.height,
        );
        self.draw_scope(frame, scope, ctx);
    }

    fn scroll(&mut self, forward: bool) {
        self.stations.scroll(forward);
    }

    /// Tune to the selected station, or off if it is already tuned.
    fn select(&mut self) {
        let selected = self.stations.selected();
        if let Some(previous) = self.tuned.take() {
            self.stations.toggle_at(previous);
            if previous == selected {
                tracing::debug!("radio off");
                return;
            }
        }
        self.stations.toggle_at(selected);
        self.tuned = Some(selected);
        tracing::debug!(station = selected, "radio tuned");
    }

    fn set_background_task_running(&mut self, running: bool) {
        if running {
            self.task.start();
        } else {
            self.task.stop();
        }
    }
}
