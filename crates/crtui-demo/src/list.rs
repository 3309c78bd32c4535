#![forbid(unsafe_code)]

//! Scrollable, selectable list used by the demo tabs.

use crtui::{Buffer, Cell, ColorRole, Draw, Rect, Theme};

/// Marker drawn before a marked entry.
const MARK: &str = "■ ";
const NO_MARK: &str = "  ";

#[derive(Debug, Clone)]
pub struct ScrollList {
    items: Vec<String>,
    marked: Vec<bool>,
    selected: usize,
    offset: usize,
}

impl ScrollList {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        Self {
            marked: vec![false; items.len()],
            items,
            selected: 0,
            offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the selection by one, stopping at either end.
    pub fn scroll(&mut self, forward: bool) {
        if forward {
            if self.selected + 1 < self.items.len() {
                self.selected += 1;
            }
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Flip the mark on the selected entry; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.toggle_at(self.selected)
    }

    /// Flip the mark on any entry; returns the new state.
    pub fn toggle_at(&mut self, index: usize) -> bool {
        match self.marked.get_mut(index) {
            Some(mark) => {
                *mark = !*mark;
                *mark
            }
            None => false,
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.get(index).copied().unwrap_or(false)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.iter().filter(|m| **m).count()
    }

    pub fn set_item(&mut self, index: usize, text: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            *item = text.into();
        }
    }

    /// Keep the selection inside a window of `rows` entries.
    fn follow(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
    }

    /// Draw the visible window into `area`. The selected row is inverted.
    pub fn render(&mut self, frame: &mut Buffer, area: Rect, theme: &Theme) {
        self.follow(usize::from(area.height));
        let light = theme.color(ColorRole::Light);
        let normal = Cell::BLANK.with_fg(light);
        let inverted = Cell::BLANK
            .with_fg(theme.color(ColorRole::Background))
            .with_bg(light);

        for (row, index) in area.rows().zip(self.offset..self.items.len()) {
            let base = if index == self.selected { inverted } else { normal };
            if index == self.selected {
                frame.fill(area.row(row - area.y), base);
            }
            let mark = if self.marked[index] { MARK } else { NO_MARK };
            let x = frame.print_text_clipped(area.x, row, mark, base, area.right());
            frame.print_text_clipped(x, row, &self.items[index], base, area.right());
        }
    }
}
