#![forbid(unsafe_code)]

//! Pre-rendered header and sub-tab surfaces.
//!
//! Everything that involves font rasterization happens in
//! [`SurfaceCache::build`]. Composing a frame afterwards is pure blitting,
//! so switching tabs or sub-tabs never touches a font.
//!
//! # Surfaces
//!
//! - `header`: every main-tab label plus the rule under them.
//! - `highlights[i]`: overlay marking tab `i` as active (bold label,
//!   brackets, and a gap in the rule).
//! - `subtab_bars[i][k]`: tab `i`'s sub-tab bar with sub-tab `k` active,
//!   shifted so label `k` sits under tab `i`. Empty for tabs without
//!   sub-tabs.

use crtui_render::{Buffer, Cell, Draw, StyleFlags};
use crtui_style::{ColorRole, FontRole, Theme};

/// Immutable set of pre-rendered chrome surfaces for one screen width.
#[derive(Debug, Clone)]
pub struct SurfaceCache {
    width: u16,
    offsets: Vec<u16>,
    label_widths: Vec<u16>,
    header: Buffer,
    highlights: Vec<Buffer>,
    subtab_bars: Vec<Vec<Buffer>>,
}

impl SurfaceCache {
    /// Render every surface for `names` (with their `sub_tabs`) at `width`.
    pub fn build(theme: &Theme, width: u16, names: &[String], sub_tabs: &[Vec<String>]) -> Self {
        let _span = tracing::info_span!("surface_cache_build", tabs = names.len(), width).entered();
        let width = width.max(1);
        let layout = theme.layout();
        let tab_font = theme.font(FontRole::Tab);

        let labels: Vec<Buffer> = names
            .iter()
            .map(|name| tab_font.rasterize(name, theme.color(ColorRole::Middle)))
            .collect();
        let label_widths: Vec<u16> = labels.iter().map(Buffer::width).collect();
        let offsets = tab_offsets(width, &label_widths, layout.tab_margin);

        let mut header = header_frame(theme, width);
        for (label, &x) in labels.iter().zip(&offsets) {
            header.blit(label, i32::from(x), 0);
        }

        let highlights = names
            .iter()
            .zip(offsets.iter().zip(&label_widths))
            .map(|(name, (&x, &w))| highlight_surface(theme, width, name, x, w))
            .collect();

        let subtab_bars = offsets
            .iter()
            .zip(&label_widths)
            .enumerate()
            .map(|(i, (&x, &w))| {
                let subs = sub_tabs.get(i).map_or(&[][..], Vec::as_slice);
                subtab_surfaces(theme, width, subs, x, w)
            })
            .collect();

        tracing::debug!(rasterized = theme.rasterized(), "surface cache ready");
        Self {
            width,
            offsets,
            label_widths,
            header,
            highlights,
            subtab_bars,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Left column of each main-tab label.
    #[inline]
    pub fn offsets(&self) -> &[u16] {
        &self.offsets
    }

    #[inline]
    pub fn label_widths(&self) -> &[u16] {
        &self.label_widths
    }

    #[inline]
    pub fn header(&self) -> &Buffer {
        &self.header
    }

    pub fn highlight(&self, tab: usize) -> Option<&Buffer> {
        self.highlights.get(tab)
    }

    pub fn highlight_count(&self) -> usize {
        self.highlights.len()
    }

    /// Bar for `tab` with sub-tab `sub` active. `None` for tabs without
    /// sub-tabs.
    pub fn subtab_bar(&self, tab: usize, sub: usize) -> Option<&Buffer> {
        self.subtab_bars.get(tab).and_then(|bars| bars.get(sub))
    }

    pub fn subtab_bar_count(&self, tab: usize) -> usize {
        self.subtab_bars.get(tab).map_or(0, Vec::len)
    }
}

/// Left column of each label, spread evenly between the margins.
///
/// `spacing = (width - Σw - 2·margin) / (n + 1)`, saturating at zero.
pub fn tab_offsets(width: u16, label_widths: &[u16], margin: u16) -> Vec<u16> {
    let total: u32 = label_widths.iter().map(|&w| u32::from(w)).sum();
    let free = u32::from(width).saturating_sub(total + 2 * u32::from(margin));
    let spacing = free / (label_widths.len() as u32 + 1);

    let mut x = u32::from(margin) + spacing;
    label_widths
        .iter()
        .map(|&w| {
            let at = x.min(u32::from(u16::MAX)) as u16;
            x += u32::from(w) + spacing;
            at
        })
        .collect()
}

fn header_frame(theme: &Theme, width: u16) -> Buffer {
    let height = theme.layout().header_height.max(1);
    let mut header = Buffer::new(width, height);
    if height < 2 {
        return header;
    }
    let line = Cell::from_char('─').with_fg(theme.color(ColorRole::Light));
    header.draw_horizontal_line(0, 1, width, line);
    header.set(0, 1, line.with_char('┌'));
    if width > 1 {
        header.set(width - 1, 1, line.with_char('┐'));
    }
    if height > 2 {
        header.draw_vertical_line(0, 2, height - 2, line.with_char('│'));
        header.draw_vertical_line(width - 1, 2, height - 2, line.with_char('│'));
    }
    header
}

fn highlight_surface(theme: &Theme, width: u16, name: &str, x: u16, w: u16) -> Buffer {
    let layout = theme.layout();
    let light = theme.color(ColorRole::Light);
    let mut overlay = Buffer::new(width, layout.header_height.max(1));

    let mut label = theme.font(FontRole::Tab).rasterize(name, light);
    for cell in label.cells_mut() {
        cell.flags |= StyleFlags::BOLD;
    }
    overlay.blit(&label, i32::from(x), 0);

    let left = i32::from(x) - i32::from(layout.tab_bracket_offset);
    let right = i32::from(x) + i32::from(w) + i32::from(layout.tab_bracket_offset) - 1;
    let edge = Cell::from_char(' ').with_fg(light);
    put(&mut overlay, left, 0, edge.with_char('┌'));
    put(&mut overlay, right, 0, edge.with_char('┐'));

    if overlay.height() >= 2 {
        let gap = Cell::BLANK.with_bg(theme.color(ColorRole::Background));
        for col in left + 1..right {
            put(&mut overlay, col, 1, gap);
        }
        put(&mut overlay, left, 1, edge.with_char('┘'));
        put(&mut overlay, right, 1, edge.with_char('└'));
    }
    overlay
}

fn subtab_surfaces(theme: &Theme, width: u16, subs: &[String], x: u16, w: u16) -> Vec<Buffer> {
    if subs.is_empty() {
        return Vec::new();
    }
    let layout = theme.layout();
    let font = theme.font(FontRole::SubTab);
    let active: Vec<Buffer> = subs
        .iter()
        .map(|s| font.rasterize(s, theme.color(ColorRole::Light)))
        .collect();
    let inactive: Vec<Buffer> = subs
        .iter()
        .map(|s| font.rasterize(s, theme.color(ColorRole::Dark)))
        .collect();

    // Unshifted left column of each label.
    let mut positions = Vec::with_capacity(subs.len());
    let mut pos = 0i32;
    for label in &inactive {
        positions.push(pos);
        pos += i32::from(label.width()) + i32::from(layout.subtab_spacing);
    }

    let anchor = i32::from(x) + i32::from(w) / 2;
    let height = layout.subtab_bar_height.max(1);
    (0..subs.len())
        .map(|k| {
            let shift = anchor - (positions[k] + i32::from(active[k].width()) / 2);
            let mut bar = Buffer::new(width, height);
            for (j, &p) in positions.iter().enumerate() {
                let label = if j == k { &active[j] } else { &inactive[j] };
                bar.blit(label, shift + p, 0);
            }
            bar
        })
        .collect()
}

fn put(buf: &mut Buffer, x: i32, y: u16, cell: Cell) {
    if let Ok(x) = u16::try_from(x) {
        buf.set(x, y, cell);
    }
}
