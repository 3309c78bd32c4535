#![forbid(unsafe_code)]

//! Tab navigation and frame orchestration.
//!
//! A [`TabRegistry`] collects tabs in display order. [`TabEngine::start`]
//! freezes it, builds one [`TabContent`] instance per tab, and pre-renders
//! the header and sub-tab chrome into a [`SurfaceCache`]. From then on the
//! driver feeds [`NavEvent`](crtui_core::NavEvent)s to
//! [`TabEngine::handle`] and calls [`TabEngine::render_frame`] once per
//! tick.
//!
//! # Example
//!
//! ```
//! use crtui_fx::FxQuality;
//! use crtui_render::Buffer;
//! use crtui_style::Theme;
//! use crtui_tabs::{RenderContext, TabContent, TabContext, TabEngine, TabRegistry};
//!
//! struct Blank;
//!
//! impl TabContent for Blank {
//!     fn activate(&mut self) {}
//!     fn deactivate(&mut self) {}
//!     fn render(&mut self, _frame: &mut Buffer, _ctx: &RenderContext<'_>) {}
//! }
//!
//! let mut registry = TabRegistry::new();
//! registry
//!     .register("STAT", |_: &TabContext| Box::new(Blank) as Box<dyn TabContent>, ["STATUS"])
//!     .unwrap();
//! let mut engine = TabEngine::start(&mut registry, Theme::default(), 80, 24, FxQuality::Off).unwrap();
//! engine.render_frame();
//! assert_eq!(engine.current_tab_name(), "STAT");
//! ```

pub mod cache;
pub mod content;
pub mod engine;
pub mod error;
pub mod footer;
pub mod lifecycle;
pub mod nav;
pub mod registry;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::SurfaceCache;
pub use content::{RenderContext, TabContent, TabContext, TabFactory};
pub use engine::{Control, FrameOutcome, FrameStats, TabEngine, TabSwitch, TransitionEffect};
pub use error::EngineError;
pub use footer::FooterBar;
pub use lifecycle::{TaskLifecycle, TaskSignals};
pub use nav::{Navigator, SubTabChange, TabChange};
pub use registry::TabRegistry;
pub use task::{BackgroundTask, StopSignal};
