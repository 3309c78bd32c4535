#![forbid(unsafe_code)]

//! The tab engine: navigation, per-frame composition, and effects.
//!
//! # Frame order
//!
//! [`TabEngine::render_frame`] composes in a fixed order: clear to the
//! background colour, header, active highlight, sub-tab bar, tab content
//! (clipped to its content rectangle), footer, then the effect pipeline.
//! Chrome comes from the [`SurfaceCache`]; no font is rasterized here.
//!
//! # Glitch sequences
//!
//! A tab switch either queues a blur for the next frame or starts a glitch
//! sequence on the shared frame. While a sequence runs the engine does not
//! compose; `render_frame` returns [`FrameOutcome::HeldByGlitch`] and the
//! driver keeps presenting the distorted buffer. That hold is the only guard
//! between the worker and the engine: navigation keeps running during a
//! sequence and never touches the frame, so no lock wraps `switch_tab`.
//! Below [`FxQuality::Reduced`] a switch makes no transition draw at all.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crtui_core::event::NavEvent;
use crtui_core::geometry::Rect;
use crtui_fx::{EffectCompositor, FxQuality, GlitchSequence, Passes, TransitionChoice};
use crtui_render::{Buffer, Cell};
use crtui_style::{ColorRole, ColorScheme, Theme};

use crate::cache::SurfaceCache;
use crate::content::{RenderContext, TabContent, TabContext};
use crate::error::EngineError;
use crate::lifecycle::{TaskLifecycle, TaskSignals};
use crate::nav::{Navigator, SubTabChange, TabChange};
use crate::registry::TabRegistry;

/// Effect chosen for a tab switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// A blur is queued for the next composed frame.
    Blur,
    /// A glitch sequence started.
    GlitchSequence,
    /// A glitch sequence was chosen but one was already running.
    GlitchDropped,
}

/// A completed tab switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSwitch {
    pub from: usize,
    pub to: usize,
    /// `None` when effects are off.
    pub effect: Option<TransitionEffect>,
}

/// Result of [`TabEngine::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A new frame was composed; carries the effect passes that ran.
    Composed(Passes),
    /// A glitch sequence owns the frame; nothing was composed.
    HeldByGlitch,
}

/// What the driver should do after [`TabEngine::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames composed.
    pub composed: u64,
    /// Frames skipped because a glitch sequence held the buffer.
    pub held: u64,
    /// Wall time of the last composed frame.
    pub last_frame: Duration,
}

/// Owns every tab, the shared frame, and the effect pipeline.
pub struct TabEngine {
    theme: Arc<Theme>,
    width: u16,
    height: u16,
    names: Vec<String>,
    sub_tabs: Vec<Vec<String>>,
    tabs: Vec<Box<dyn TabContent>>,
    areas: Vec<Rect>,
    nav: Navigator,
    cache: SurfaceCache,
    lifecycle: TaskLifecycle,
    fx: EffectCompositor,
    glitch: GlitchSequence,
    frame: Arc<Mutex<Buffer>>,
    stats: FrameStats,
    shut_down: bool,
}

impl TabEngine {
    /// Start an engine over every tab in `registry`.
    ///
    /// Validates the theme, freezes the registry, builds one content
    /// instance per tab, renders the surface cache, and activates the first
    /// tab (including its background task start signal).
    pub fn start(
        registry: &mut TabRegistry,
        theme: Theme,
        width: u16,
        height: u16,
        quality: FxQuality,
    ) -> Result<Self, EngineError> {
        if registry.is_empty() {
            return Err(EngineError::NoTabs);
        }
        theme.effects().validate()?;
        registry.freeze();

        let (width, height) = (width.max(1), height.max(1));
        let theme = Arc::new(theme);
        let names: Vec<String> = registry.names().map(str::to_owned).collect();
        let sub_tabs = names
            .iter()
            .map(|name| registry.sub_tabs(name).map(<[String]>::to_vec))
            .collect::<Result<Vec<_>, _>>()?;
        let areas = content_areas(&theme, width, height, &sub_tabs);

        let mut tabs = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let ctx = TabContext {
                name: name.clone(),
                index,
                sub_tabs: sub_tabs[index].clone(),
                theme: Arc::clone(&theme),
                area: areas[index],
                screen_width: width,
                screen_height: height,
            };
            tabs.push(registry.instantiate(name, &ctx)?);
        }

        let cache = SurfaceCache::build(&theme, width, &names, &sub_tabs);
        let counts: Vec<usize> = sub_tabs.iter().map(Vec::len).collect();
        let effects = theme.effects();
        let fx = EffectCompositor::new(effects, quality);
        let glitch = GlitchSequence::new(effects.glitch_frame_count, effects.glitch_frame_interval);

        let mut engine = Self {
            nav: Navigator::new(&counts),
            lifecycle: TaskLifecycle::new(names.len()),
            frame: Arc::new(Mutex::new(Buffer::new(width, height))),
            theme,
            width,
            height,
            names,
            sub_tabs,
            tabs,
            areas,
            cache,
            fx,
            glitch,
            stats: FrameStats::default(),
            shut_down: false,
        };

        let first = &mut engine.tabs[0];
        first.activate();
        engine.lifecycle.start(0, first.as_mut());
        tracing::info!(
            tabs = engine.names.len(),
            width,
            height,
            quality = ?quality,
            "tab engine started"
        );
        Ok(engine)
    }

    // ----- Navigation -----

    /// Step to the next or previous tab. `None` at either end.
    pub fn switch_tab(&mut self, forward: bool) -> Option<TabSwitch> {
        let TabChange { from, to } = self.nav.switch_tab(forward)?;
        tracing::debug!(from = %self.names[from], to = %self.names[to], "tab switch");

        self.tabs[from].deactivate();
        self.tabs[to].activate();
        self.lifecycle.transition(from, to, &mut self.tabs);

        let effect = self.fx.choose_transition().map(|choice| match choice {
            TransitionChoice::Blur => TransitionEffect::Blur,
            TransitionChoice::GlitchSequence => {
                if self.glitch.try_start(&self.frame) {
                    TransitionEffect::GlitchSequence
                } else {
                    TransitionEffect::GlitchDropped
                }
            }
        });
        Some(TabSwitch { from, to, effect })
    }

    /// Step the current tab's sub-tab. `None` at either end or when the
    /// tab has no sub-tabs.
    pub fn switch_sub_tab(&mut self, forward: bool) -> Option<SubTabChange> {
        let change = self.nav.switch_sub_tab(forward)?;
        tracing::debug!(tab = %self.names[change.tab], from = change.from, to = change.to, "sub-tab switch");
        self.tabs[change.tab].change_sub_tab(change.to);
        Some(change)
    }

    pub fn scroll(&mut self, forward: bool) {
        self.current_tab_mut().scroll(forward);
    }

    pub fn select(&mut self) {
        self.current_tab_mut().select();
    }

    pub fn navigate(&mut self, direction: i32) {
        self.current_tab_mut().navigate(direction);
    }

    /// Dispatch a navigation event.
    pub fn handle(&mut self, event: NavEvent) -> Control {
        match event {
            NavEvent::TabForward => {
                self.switch_tab(true);
            }
            NavEvent::TabBackward => {
                self.switch_tab(false);
            }
            NavEvent::SubTabForward => {
                self.switch_sub_tab(true);
            }
            NavEvent::SubTabBackward => {
                self.switch_sub_tab(false);
            }
            NavEvent::ScrollForward => self.scroll(true),
            NavEvent::ScrollBackward => self.scroll(false),
            NavEvent::Select => self.select(),
            NavEvent::Quit => return Control::Quit,
        }
        Control::Continue
    }

    // ----- Frame -----

    /// Compose one frame into the shared buffer.
    pub fn render_frame(&mut self) -> FrameOutcome {
        if self.glitch.is_running() {
            self.stats.held += 1;
            return FrameOutcome::HeldByGlitch;
        }

        let started = Instant::now();
        let tab = self.nav.current();
        let sub_tab = self.nav.current_sub();
        let _span = tracing::debug_span!("frame", tab, sub_tab).entered();

        let mut frame = self.frame.lock().unwrap_or_else(PoisonError::into_inner);
        frame.clear_with(Cell::BLANK.with_bg(self.theme.color(ColorRole::Background)));

        frame.blit(self.cache.header(), 0, 0);
        if let Some(highlight) = self.cache.highlight(tab) {
            frame.blit(highlight, 0, 0);
        }
        if let Some(bar) = self.cache.subtab_bar(tab, sub_tab) {
            frame.blit(bar, 0, i32::from(self.theme.subtab_row()));
        }

        let area = self.areas[tab];
        let ctx = RenderContext {
            theme: &self.theme,
            area,
            sub_tab,
            frame: self.fx.frames(),
        };
        let depth = frame.scissor_depth();
        frame.push_scissor(area);
        self.tabs[tab].render(&mut frame, &ctx);
        while frame.scissor_depth() > depth {
            frame.pop_scissor();
        }

        if let (Some(footer), Some(row)) =
            (self.tabs[tab].footer(), self.theme.footer_row(self.height))
        {
            frame.push_scissor(Rect::new(0, row, self.width, self.theme.layout().footer_height));
            frame.blit(footer, 0, i32::from(row));
            frame.pop_scissor();
        }

        let passes = self.fx.apply(&mut frame, self.theme.scheme());
        drop(frame);

        self.stats.composed += 1;
        self.stats.last_frame = started.elapsed();
        FrameOutcome::Composed(passes)
    }

    /// Run `f` with the frame locked, e.g. to present it.
    pub fn with_frame<R>(&self, f: impl FnOnce(&Buffer) -> R) -> R {
        let frame = self.frame.lock().unwrap_or_else(PoisonError::into_inner);
        f(&frame)
    }

    /// Shared handle to the frame buffer.
    pub fn frame_handle(&self) -> Arc<Mutex<Buffer>> {
        Arc::clone(&self.frame)
    }

    // ----- Geometry and theme -----

    /// Reallocate the frame and rebuild every size-dependent surface.
    pub fn resize(&mut self, width: u16, height: u16) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.width, self.height) {
            return;
        }
        tracing::debug!(width, height, "resize");
        self.width = width;
        self.height = height;
        self.areas = content_areas(&self.theme, width, height, &self.sub_tabs);
        *self.frame.lock().unwrap_or_else(PoisonError::into_inner) = Buffer::new(width, height);
        self.rebuild_cache();
    }

    /// Switch colour scheme and rebuild the surface cache.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        tracing::debug!(scheme = scheme.name, "colour scheme change");
        self.theme = Arc::new(self.theme.with_scheme(scheme));
        self.rebuild_cache();
    }

    pub fn set_fx_quality(&mut self, quality: FxQuality) {
        self.fx.set_quality(quality);
    }

    fn rebuild_cache(&mut self) {
        self.cache = SurfaceCache::build(&self.theme, self.width, &self.names, &self.sub_tabs);
    }

    // ----- Introspection -----

    #[inline]
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    #[inline]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cache(&self) -> &SurfaceCache {
        &self.cache
    }

    #[inline]
    pub fn effects(&self) -> &EffectCompositor {
        &self.fx
    }

    #[inline]
    pub fn tab_count(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.nav.previous()
    }

    pub fn current_tab_name(&self) -> &str {
        &self.names[self.nav.current()]
    }

    pub fn current_sub_index(&self) -> usize {
        self.nav.current_sub()
    }

    /// Remembered sub-tab of any tab.
    pub fn sub_index(&self, tab: usize) -> usize {
        self.nav.sub_index(tab)
    }

    pub fn sub_tab_names(&self, tab: usize) -> &[String] {
        self.sub_tabs.get(tab).map_or(&[][..], Vec::as_slice)
    }

    pub fn tab_names(&self) -> &[String] {
        &self.names
    }

    /// Content rectangle of `tab` on the current screen.
    pub fn content_area(&self, tab: usize) -> Option<Rect> {
        self.areas.get(tab).copied()
    }

    #[inline]
    pub fn frame_stats(&self) -> FrameStats {
        self.stats
    }

    #[inline]
    pub fn glitch_running(&self) -> bool {
        self.glitch.is_running()
    }

    /// Glitch sequences that ran to completion.
    pub fn glitches_completed(&self) -> u64 {
        self.glitch.completed()
    }

    /// Block until any running glitch sequence has finished.
    pub fn wait_for_glitch(&mut self) {
        self.glitch.join();
    }

    pub fn task_running(&self, tab: usize) -> bool {
        self.lifecycle.is_running(tab)
    }

    pub fn task_signals(&self, tab: usize) -> TaskSignals {
        self.lifecycle.signals(tab)
    }

    // ----- Shutdown -----

    /// Tell every running background task to stop. Does not wait.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        let stopped = self.lifecycle.stop_all(&mut self.tabs);
        tracing::info!(stopped, "tab engine shut down");
    }

    fn current_tab_mut(&mut self) -> &mut dyn TabContent {
        let tab = self.nav.current();
        self.tabs[tab].as_mut()
    }
}

impl Drop for TabEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TabEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabEngine")
            .field("tabs", &self.names)
            .field("current", &self.nav.current())
            .field("size", &(self.width, self.height))
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

fn content_areas(theme: &Theme, width: u16, height: u16, sub_tabs: &[Vec<String>]) -> Vec<Rect> {
    sub_tabs
        .iter()
        .map(|subs| theme.content_rect(width, height, !subs.is_empty()))
        .collect()
}
