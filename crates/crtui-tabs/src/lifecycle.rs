#![forbid(unsafe_code)]

//! Background task signalling across tab switches.
//!
//! Exactly one tab is told to run its background task at a time: the
//! visible one. On a switch the previous tab is told to stop before the
//! next is told to start. Signals already in effect are not re-sent.

use crate::content::TabContent;

/// Signals sent to one tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSignals {
    pub starts: u64,
    pub stops: u64,
}

/// Tracks which tab was last told to run.
#[derive(Debug, Clone)]
pub struct TaskLifecycle {
    running: Vec<bool>,
    signals: Vec<TaskSignals>,
}

impl TaskLifecycle {
    pub fn new(tab_count: usize) -> Self {
        Self {
            running: vec![false; tab_count],
            signals: vec![TaskSignals::default(); tab_count],
        }
    }

    /// Tell `tab` to start. Returns `false` if it was already told so.
    pub fn start(&mut self, index: usize, tab: &mut dyn TabContent) -> bool {
        match self.running.get_mut(index) {
            Some(running) if !*running => {
                *running = true;
                self.signals[index].starts += 1;
                tracing::trace!(tab = index, "background task start signal");
                tab.set_background_task_running(true);
                true
            }
            _ => false,
        }
    }

    /// Tell `tab` to stop. Returns `false` if it was not running.
    pub fn stop(&mut self, index: usize, tab: &mut dyn TabContent) -> bool {
        match self.running.get_mut(index) {
            Some(running) if *running => {
                *running = false;
                self.signals[index].stops += 1;
                tracing::trace!(tab = index, "background task stop signal");
                tab.set_background_task_running(false);
                true
            }
            _ => false,
        }
    }

    /// Stop `from`, then start `to`.
    pub fn transition(&mut self, from: usize, to: usize, tabs: &mut [Box<dyn TabContent>]) {
        if from == to {
            return;
        }
        if let Some(tab) = tabs.get_mut(from) {
            self.stop(from, tab.as_mut());
        }
        if let Some(tab) = tabs.get_mut(to) {
            self.start(to, tab.as_mut());
        }
    }

    /// Stop every tab still told to run.
    pub fn stop_all(&mut self, tabs: &mut [Box<dyn TabContent>]) -> usize {
        let mut stopped = 0;
        for (index, tab) in tabs.iter_mut().enumerate() {
            if self.stop(index, tab.as_mut()) {
                stopped += 1;
            }
        }
        stopped
    }

    pub fn is_running(&self, index: usize) -> bool {
        self.running.get(index).copied().unwrap_or(false)
    }

    pub fn running_count(&self) -> usize {
        self.running.iter().filter(|r| **r).count()
    }

    pub fn signals(&self, index: usize) -> TaskSignals {
        self.signals.get(index).copied().unwrap_or_default()
    }
}
