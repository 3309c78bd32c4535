#![forbid(unsafe_code)]

//! Tab and sub-tab indices.
//!
//! Navigation saturates: stepping past either end of the tab list or a
//! sub-tab list is a no-op. Each tab remembers its own active sub-tab, so
//! switching away and back restores it.

/// A change of main tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChange {
    pub from: usize,
    pub to: usize,
}

/// A change of sub-tab within `tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTabChange {
    pub tab: usize,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct SubTabState {
    count: usize,
    current: usize,
    previous: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    previous: Option<usize>,
    sub_tabs: Vec<SubTabState>,
}

impl Navigator {
    /// One entry per tab giving its sub-tab count. Starts on tab 0, sub 0.
    pub fn new(sub_tab_counts: &[usize]) -> Self {
        Self {
            current: 0,
            previous: None,
            sub_tabs: sub_tab_counts
                .iter()
                .map(|&count| SubTabState {
                    count,
                    ..SubTabState::default()
                })
                .collect(),
        }
    }

    #[inline]
    pub fn tab_count(&self) -> usize {
        self.sub_tabs.len()
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Tab shown before the most recent switch.
    #[inline]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Active sub-tab of the current tab.
    pub fn current_sub(&self) -> usize {
        self.sub_index(self.current)
    }

    /// Remembered sub-tab of any tab.
    pub fn sub_index(&self, tab: usize) -> usize {
        self.sub_tabs.get(tab).map_or(0, |s| s.current)
    }

    /// Sub-tab shown before the most recent sub-tab switch in `tab`.
    pub fn previous_sub(&self, tab: usize) -> Option<usize> {
        self.sub_tabs.get(tab).and_then(|s| s.previous)
    }

    pub fn sub_count(&self, tab: usize) -> usize {
        self.sub_tabs.get(tab).map_or(0, |s| s.count)
    }

    /// Step the main tab; `None` at either end.
    pub fn switch_tab(&mut self, forward: bool) -> Option<TabChange> {
        let to = step(self.current, self.tab_count(), forward)?;
        let from = self.current;
        self.previous = Some(from);
        self.current = to;
        Some(TabChange { from, to })
    }

    /// Step the current tab's sub-tab; `None` at either end or when the tab
    /// has no sub-tabs.
    pub fn switch_sub_tab(&mut self, forward: bool) -> Option<SubTabChange> {
        let tab = self.current;
        let state = self.sub_tabs.get_mut(tab)?;
        let to = step(state.current, state.count, forward)?;
        let from = state.current;
        state.previous = Some(from);
        state.current = to;
        Some(SubTabChange { tab, from, to })
    }
}

fn step(current: usize, count: usize, forward: bool) -> Option<usize> {
    if forward {
        let next = current + 1;
        (next < count).then_some(next)
    } else {
        current.checked_sub(1)
    }
}
