#![forbid(unsafe_code)]

//! DATA: quests and notes, plus a live clock kept by a background task.
//!
//! The clock task only touches [`ClockState`] behind its mutex; the render
//! thread takes the same lock for a snapshot.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crtui::{
    BackgroundTask, Buffer, Cell, ColorRole, Draw, Rect, RenderContext, StopSignal, TabContent,
    TabContext,
};

use super::{StatusFooter, body};
use crate::list::ScrollList;

const TICK: Duration = Duration::from_millis(250);

/// State shared between the clock task and the render thread.
#[derive(Debug, Clone, Copy)]
pub struct ClockState {
    pub ticks: u64,
    pub uptime: Duration,
}

pub struct DataTab {
    lists: [ScrollList; 2],
    sub: usize,
    clock: Arc<Mutex<ClockState>>,
    task: BackgroundTask,
    footer: StatusFooter,
}

impl DataTab {
    pub const SUB_TABS: [&'static str; 2] = ["QUESTS", "NOTES"];

    pub fn new(ctx: &TabContext) -> Self {
        let clock = Arc::new(Mutex::new(ClockState {
            ticks: 0,
            uptime: Duration::ZERO,
        }));
        let shared = Arc::clone(&clock);
        let task = BackgroundTask::new("data-clock", move |stop: StopSignal| {
            while !stop.wait_timeout(TICK) {
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                state.ticks += 1;
                state.uptime += TICK;
            }
        });
        Self {
            lists: [
                ScrollList::new([
                    "When Freedom Calls",
                    "Out of Time",
                    "Jewel of the Commonwealth",
                    "Unlikely Valentine",
                    "Getting a Clue",
                ]),
                ScrollList::new([
                    "Holotape: Vault-Tec Rep",
                    "Note: Codsworth's List",
                    "Terminal Entry: Overseer",
                ]),
            ],
            sub: 0,
            clock,
            task,
            footer: StatusFooter::new(ctx, &["DATA", "UPTIME 00:00:00", "TICKS 0"]),
        }
    }

    pub fn clock(&self) -> ClockState {
        *self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn task_running(&self) -> bool {
        self.task.is_running()
    }
}

fn hms(d: Duration) -> String {
    let s = d.as_secs();
    format!("{:02}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
}

impl TabContent for DataTab {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn render(&mut self, frame: &mut Buffer, ctx: &RenderContext<'_>) {
        let state = self.clock();
        let area = body(ctx.area);
        let heading = Cell::BLANK.with_fg(ctx.theme.color(ColorRole::Middle));
        frame.print_text_clipped(
            area.x,
            area.y,
            &format!("LOCAL TIME +{}", hms(state.uptime)),
            heading,
            area.right(),
        );
        let list_area = Rect::new(
            area.x,
            area.y.saturating_add(2),
            area.width,
            area.height.saturating_sub(2),
        );
        if let Some(list) = self.lists.get_mut(ctx.sub_tab) {
            list.render(frame, list_area, ctx.theme);
        }

        let segments = [
            "DATA".to_owned(),
            format!("UPTIME {}", hms(state.uptime)),
            format!("TICKS {}", state.ticks),
        ];
        self.footer.sync(ctx, &segments);
    }

    fn scroll(&mut self, forward: bool) {
        self.lists[self.sub].scroll(forward);
    }

    fn select(&mut self) {
        self.lists[self.sub].toggle();
    }

    fn change_sub_tab(&mut self, index: usize) {
        self.sub = index.min(self.lists.len() - 1);
    }

    fn set_background_task_running(&mut self, running: bool) {
        if running {
            self.task.start();
        } else {
            self.task.stop();
        }
    }

    fn footer(&self) -> Option<&Buffer> {
        Some(self.footer.surface())
    }
}
