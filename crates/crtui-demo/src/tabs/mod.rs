#![forbid(unsafe_code)]

//! The demo's tabs.

pub mod data;
pub mod inv;
pub mod radio;
pub mod stat;

use crtui::{EngineError, FooterBar, Rect, RenderContext, Sides, TabContent, TabContext, TabRegistry};

pub use data::DataTab;
pub use inv::InvTab;
pub use radio::RadioTab;
pub use stat::StatTab;

/// Register every demo tab in display order.
pub fn register_all(registry: &mut TabRegistry) -> Result<(), EngineError> {
    registry.register(
        "STAT",
        |ctx: &TabContext| Box::new(StatTab::new(ctx)) as Box<dyn TabContent>,
        StatTab::SUB_TABS,
    )?;
    registry.register(
        "INV",
        |ctx: &TabContext| Box::new(InvTab::new(ctx)) as Box<dyn TabContent>,
        InvTab::SUB_TABS,
    )?;
    registry.register(
        "DATA",
        |ctx: &TabContext| Box::new(DataTab::new(ctx)) as Box<dyn TabContent>,
        DataTab::SUB_TABS,
    )?;
    registry.register(
        "RADIO",
        |ctx: &TabContext| Box::new(RadioTab::new(ctx)) as Box<dyn TabContent>,
        Vec::<String>::new(),
    )?;
    Ok(())
}

/// Content area minus the side padding.
fn body(area: Rect) -> Rect {
    area.inner(Sides::horizontal(2))
}

/// Footer bar that follows screen width and colour scheme changes.
#[derive(Debug)]
struct StatusFooter {
    bar: FooterBar,
    scheme: &'static str,
}

impl StatusFooter {
    fn new(ctx: &TabContext, segments: &[&str]) -> Self {
        Self {
            bar: FooterBar::new(&ctx.theme, ctx.screen_width, segments.iter().copied()),
            scheme: ctx.theme.scheme().name,
        }
    }

    /// Bring the bar up to date; only changed text is re-rendered.
    fn sync(&mut self, ctx: &RenderContext<'_>, segments: &[String]) {
        if ctx.theme.scheme().name != self.scheme {
            self.scheme = ctx.theme.scheme().name;
            self.bar.restyle(ctx.theme);
        }
        self.bar.resize(ctx.theme, ctx.area.width);
        for (i, text) in segments.iter().enumerate() {
            self.bar.set_segment(ctx.theme, i, text);
        }
    }

    fn surface(&self) -> &crtui::Buffer {
        self.bar.surface()
    }
}
