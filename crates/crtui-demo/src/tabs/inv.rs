#![forbid(unsafe_code)]

//! INV: weapons, apparel, and aid. Selecting equips gear or uses aid.

use crtui::{Buffer, RenderContext, TabContent, TabContext};

use super::{StatusFooter, body};
use crate::list::ScrollList;

const CARRY_LIMIT: u32 = 210;
const AID: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Item {
    name: &'static str,
    /// Weight in tenths of a pound.
    weight: u32,
    count: u32,
}

impl Item {
    const fn new(name: &'static str, weight: u32, count: u32) -> Self {
        Self { name, weight, count }
    }

    fn label(&self) -> String {
        if self.count == 1 {
            self.name.to_owned()
        } else {
            format!("{} ({})", self.name, self.count)
        }
    }
}

pub struct InvTab {
    items: [Vec<Item>; 3],
    lists: [ScrollList; 3],
    sub: usize,
    footer: StatusFooter,
}

impl InvTab {
    pub const SUB_TABS: [&'static str; 3] = ["WEAPONS", "APPAREL", "AID"];

    pub fn new(ctx: &TabContext) -> Self {
        let items = [
            vec![
                Item::new("10mm Pistol", 40, 1),
                Item::new("Hunting Rifle", 90, 1),
                Item::new("Combat Knife", 10, 1),
                Item::new("Frag Grenade", 5, 4),
                Item::new("Laser Musket", 128, 1),
            ],
            vec![
                Item::new("Vault 111 Jumpsuit", 10, 1),
                Item::new("Leather Armor", 80, 1),
                Item::new("Road Leathers", 20, 1),
                Item::new("Gas Mask", 20, 1),
            ],
            vec![
                Item::new("Stimpak", 1, 6),
                Item::new("RadAway", 1, 3),
                Item::new("Rad-X", 1, 2),
                Item::new("Nuka-Cola", 10, 5),
                Item::new("Purified Water", 10, 4),
            ],
        ];
        let lists = items
            .each_ref()
            .map(|group| ScrollList::new(group.iter().map(Item::label)));
        Self {
            items,
            lists,
            sub: 0,
            footer: StatusFooter::new(ctx, &["WG 0/210", "CAPS 342", "EQUIPPED 0"]),
        }
    }

    /// Total carried weight in whole pounds.
    fn carried(&self) -> u32 {
        let tenths: u32 = self
            .items
            .iter()
            .flatten()
            .map(|item| item.weight * item.count)
            .sum();
        tenths / 10
    }

    fn equipped(&self) -> usize {
        self.lists[..AID].iter().map(ScrollList::marked_count).sum()
    }
}

impl TabContent for InvTab {
    fn activate(&mut self) {}

    fn deactivate(&mut self) {}

    fn render(&mut self, frame: &mut Buffer, ctx: &RenderContext<'_>) {
        if let Some(list) = self.lists.get_mut(ctx.sub_tab) {
            list.render(frame, body(ctx.area), ctx.theme);
        }
        let segments = [
            format!("WG {}/{CARRY_LIMIT}", self.carried()),
            "CAPS 342".to_owned(),
            format!("EQUIPPED {}", self.equipped()),
        ];
        self.footer.sync(ctx, &segments);
    }

    fn scroll(&mut self, forward: bool) {
        self.lists[self.sub].scroll(forward);
    }

    fn select(&mut self) {
        let list = &mut self.lists[self.sub];
        if self.sub != AID {
            list.toggle();
            return;
        }
        let index = list.selected();
        if let Some(item) = self.items[AID].get_mut(index)
            && item.count > 0
        {
            item.count -= 1;
            tracing::debug!(item = item.name, left = item.count, "aid used");
            list.set_item(index, item.label());
        }
    }

    fn change_sub_tab(&mut self, index: usize) {
        self.sub = index.min(self.lists.len() - 1);
    }

    fn footer(&self) -> Option<&Buffer> {
        Some(self.footer.surface())
    }
}
