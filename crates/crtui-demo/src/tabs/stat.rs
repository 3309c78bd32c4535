#![forbid(unsafe_code)]

//! STAT: condition, S.P.E.C.I.A.L., and perks.

use crtui::{Buffer, RenderContext, TabContent, TabContext};

use super::{StatusFooter, body};
use crate::list::ScrollList;

pub struct StatTab {
    lists: [ScrollList; 3],
    sub: usize,
    footer: StatusFooter,
}

impl StatTab {
    pub const SUB_TABS: [&'static str; 3] = ["STATUS", "SPECIAL", "PERKS"];

    pub fn new(ctx: &TabContext) -> Self {
        let status = ScrollList::new([
            "HEAD       ██████████",
            "LEFT ARM   ████████",
            "RIGHT ARM  ██████████",
            "TORSO      █████████",
            "LEFT LEG   ███████",
            "RIGHT LEG  ██████████",
            "RAD        0",
        ]);
        let special = ScrollList::new([
            "STRENGTH       5",
            "PERCEPTION     7",
            "ENDURANCE      4",
            "CHARISMA       6",
            "INTELLIGENCE   9",
            "AGILITY        6",
            "LUCK           3",
        ]);
        let perks = ScrollList::new([
            "Gunslinger",
            "Lead Belly",
            "Local Leader",
            "Night Person",
            "Scrounger",
            "Science!",
            "Toughness",
        ]);
        Self {
            lists: [status, special, perks],
            sub: 0,
            footer: StatusFooter::new(ctx, &["HP 115/115", "LEVEL 12", "AP 70/70"]),
        }
    }

    fn perks_taken(&self) -> usize {
        self.lists[2].marked_count()
    }

    fn visible_mut(&mut self) -> &mut ScrollList {
        &mut self.lists[self.sub]
    }
}

impl TabContent for StatTab {
    fn activate(&mut self) {
        tracing::debug!("stat tab shown");
    }

    fn deactivate(&mut self) {}

    fn render(&mut self, frame: &mut Buffer, ctx: &RenderContext<'_>) {
        if let Some(list) = self.lists.get_mut(ctx.sub_tab) {
            list.render(frame, body(ctx.area), ctx.theme);
        }
        let level = format!("LEVEL 12  PERKS {}", self.perks_taken());
        self.footer.sync(
            ctx,
            &["HP 115/115".to_owned(), level, "AP 70/70".to_owned()],
        );
    }

    fn scroll(&mut self, forward: bool) {
        self.visible_mut().scroll(forward);
    }

    fn select(&mut self) {
        self.visible_mut().toggle();
    }

    fn change_sub_tab(&mut self, index: usize) {
        self.sub = index.min(self.lists.len() - 1);
    }

    fn footer(&self) -> Option<&Buffer> {
        Some(self.footer.surface())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crtui::{Rect, Theme};

    fn ctx() -> TabContext {
        TabContext {
            name: "STAT".into(),
            index: 0,
            sub_tabs: StatTab::SUB_TABS.iter().map(|s| (*s).to_owned()).collect(),
            theme: Arc::new(Theme::default()),
            area: Rect::new(0, 4, 60, 15),
            screen_width: 60,
            screen_height: 20,
        }
    }

    #[test]
    fn input_goes_to_the_visible_list() {
        let mut tab = StatTab::new(&ctx());
        tab.change_sub_tab(2);
        tab.scroll(true);
        tab.select();
        assert_eq!(tab.lists[2].selected(), 1);
        assert_eq!(tab.lists[0].selected(), 0);
        assert_eq!(tab.perks_taken(), 1);
    }

    #[test]
    fn footer_tracks_perks() {
        let ctx = ctx();
        let theme = Arc::clone(&ctx.theme);
        let mut tab = StatTab::new(&ctx);
        tab.change_sub_tab(2);
        tab.select();
        let mut frame = Buffer::new(60, 20);
        let render = RenderContext {
            theme: &theme,
            area: ctx.area,
            sub_tab: 2,
            frame: 0,
        };
        tab.render(&mut frame, &render);
        let text: String = tab
            .footer()
            .unwrap()
            .cells()
            .iter()
            .map(|c| c.symbol)
            .collect();
        assert!(text.contains("PERKS 1"));
    }
}
