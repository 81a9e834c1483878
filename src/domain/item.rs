//! Equipment items and equip slots.

use serde::Serialize;

use super::ids::HeroId;
use super::set::SetType;
use super::stats::Stats;

keyed_struct! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct PerSlot<T> {
        enum ItemType;
        fields {
            pub weapon, Weapon;
            pub helmet, Helmet;
            pub armor, Armor;
            pub necklace, Necklace;
            pub ring, Ring;
            pub boots, Boots;
        }
    }
}

impl ItemType {
    /// Case-insensitive slot lookup.
    pub fn parse(name: &str) -> Option<ItemType> {
        let name = name.trim();
        ItemType::iter().find(|slot| slot.name().eq_ignore_ascii_case(name))
    }
}

/// One piece of equipment.
///
/// Stats are fixed at construction. The only mutable state is the
/// non-owning `equipped_to` back reference, which is maintained by
/// [`Roster`](super::Roster) as part of the equip protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    slot: ItemType,
    set: SetType,
    stats: Stats,
    equipped_to: Option<HeroId>,
}

impl Item {
    pub fn new(name: impl Into<String>, slot: ItemType, set: SetType, stats: Stats) -> Self {
        Self {
            name: name.into(),
            slot,
            set,
            stats,
            equipped_to: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> ItemType {
        self.slot
    }

    pub fn set(&self) -> SetType {
        self.set
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn equipped_to(&self) -> Option<HeroId> {
        self.equipped_to
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped_to.is_some()
    }

    /// Points the item at its new holder and returns the previous one. The
    /// caller is responsible for detaching the item from that hero.
    pub(crate) fn equip_to(&mut self, hero: HeroId) -> Option<HeroId> {
        self.equipped_to.replace(hero)
    }

    pub(crate) fn detach(&mut self) {
        self.equipped_to = None;
    }
}
