#![forbid(unsafe_code)]

//! Tab content: the capability set every tab implements.
//!
//! One instance exists per registered tab for the whole engine lifetime, so
//! scroll position, selection, and anything else a tab keeps survives
//! switching away and back.

use std::sync::Arc;

use crtui_core::geometry::Rect;
use crtui_render::Buffer;
use crtui_style::Theme;

/// What a tab receives when it is constructed.
#[derive(Debug, Clone)]
pub struct TabContext {
    /// Registered name.
    pub name: String,
    /// Registration index.
    pub index: usize,
    pub sub_tabs: Vec<String>,
    pub theme: Arc<Theme>,
    /// Where the tab's content goes on the current screen.
    pub area: Rect,
    pub screen_width: u16,
    pub screen_height: u16,
}

/// What a tab receives on every render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Current theme. May differ from the construction theme after a
    /// colour scheme switch.
    pub theme: &'a Theme,
    /// Content area. Writes outside it are clipped.
    pub area: Rect,
    /// Active sub-tab index (0 for tabs without sub-tabs).
    pub sub_tab: usize,
    /// Engine frame counter.
    pub frame: u64,
}

/// A tab's content.
///
/// `activate`, `deactivate`, and `render` are required. Every other
/// operation defaults to a no-op.
pub trait TabContent {
    /// The tab became the visible tab.
    fn activate(&mut self);

    /// The tab stopped being the visible tab.
    fn deactivate(&mut self);

    /// Draw into `frame`. The engine clips to `ctx.area`.
    fn render(&mut self, frame: &mut Buffer, ctx: &RenderContext<'_>);

    /// Scroll the tab's content.
    fn scroll(&mut self, _forward: bool) {}

    /// Act on the current selection.
    fn select(&mut self) {}

    /// The active sub-tab changed to `index`.
    fn change_sub_tab(&mut self, _index: usize) {}

    /// Start or stop the tab's background task.
    ///
    /// Signals are fire-and-forget and may be redundant; implementations
    /// must treat repeated starts or stops as no-ops and must not block.
    fn set_background_task_running(&mut self, _running: bool) {}

    /// Free-form directional input (positive is forward).
    fn navigate(&mut self, _direction: i32) {}

    /// Pre-rendered footer bar for the bottom row, if the tab has one.
    fn footer(&self) -> Option<&Buffer> {
        None
    }
}

/// Builds a tab's content from its construction context.
pub type TabFactory = Box<dyn Fn(&TabContext) -> Box<dyn TabContent> + Send + Sync>;
