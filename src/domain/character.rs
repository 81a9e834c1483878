//! Heroes: base stats, additional stat sources, equipment slots and the
//! derived equipped stats.

use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate, EquippedItems};
use super::ids::ItemId;
use super::item::{Item, ItemType, PerSlot};
use super::set::{PerSet, SetType};
use super::stats::Stats;

/// Stat sources other than gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalSource {
    Artifact,
    ExclusiveEquipment,
    Imprint,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditionalStats {
    pub artifact: Stats,
    pub exclusive_equipment: Stats,
    pub imprint: Stats,
    pub other: Stats,
}

impl AdditionalStats {
    pub fn get(&self, source: AdditionalSource) -> &Stats {
        match source {
            AdditionalSource::Artifact => &self.artifact,
            AdditionalSource::ExclusiveEquipment => &self.exclusive_equipment,
            AdditionalSource::Imprint => &self.imprint,
            AdditionalSource::Other => &self.other,
        }
    }

    pub fn set(&mut self, source: AdditionalSource, stats: Stats) {
        match source {
            AdditionalSource::Artifact => self.artifact = stats,
            AdditionalSource::ExclusiveEquipment => self.exclusive_equipment = stats,
            AdditionalSource::Imprint => self.imprint = stats,
            AdditionalSource::Other => self.other = stats,
        }
    }

    pub fn total(&self) -> Stats {
        self.other + self.artifact + self.exclusive_equipment + self.imprint
    }
}

/// A roster member.
///
/// `equipped_stats` and `active_sets` are derived state. They are rebuilt
/// from scratch by [`Character::recompute`] after every change and never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    name: String,
    base: Stats,
    additional: AdditionalStats,
    equipment: PerSlot<Option<ItemId>>,
    base_with_additional: Stats,
    active_sets: PerSet<i64>,
    equipped_stats: Stats,
}

impl Character {
    pub fn new(name: impl Into<String>, base: Stats) -> Self {
        let mut character = Self {
            name: name.into(),
            base,
            additional: AdditionalStats::default(),
            equipment: PerSlot::default(),
            base_with_additional: base,
            active_sets: PerSet::default(),
            equipped_stats: base,
        };
        character.recompute(&[]);
        character
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_stats(&self) -> &Stats {
        &self.base
    }

    pub fn additional(&self) -> &AdditionalStats {
        &self.additional
    }

    pub fn base_with_additional(&self) -> &Stats {
        &self.base_with_additional
    }

    pub fn equipped_stats(&self) -> &Stats {
        &self.equipped_stats
    }

    pub fn active_sets(&self) -> &PerSet<i64> {
        &self.active_sets
    }

    /// Set types with at least one active tier.
    pub fn active_set_types(&self) -> Vec<SetType> {
        SetType::iter().filter(|&set| self.active_sets[set] > 0).collect()
    }

    pub fn equipment(&self) -> &PerSlot<Option<ItemId>> {
        &self.equipment
    }

    pub fn equipped_in(&self, slot: ItemType) -> Option<ItemId> {
        self.equipment[slot]
    }

    pub fn equipped_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.equipment.iter().filter_map(|(_, id)| *id)
    }

    pub(crate) fn set_slot(&mut self, slot: ItemType, item: Option<ItemId>) {
        self.equipment[slot] = item;
    }

    pub(crate) fn set_additional(&mut self, source: AdditionalSource, stats: Stats) {
        self.additional.set(source, stats);
    }

    /// Rebuilds the derived stats. `items` is the item table the equipment
    /// slots index into.
    pub(crate) fn recompute(&mut self, items: &[Item]) {
        self.base_with_additional = self.base + self.additional.total();
        let equipped = self.equipped_items().map(|id| &items[id.index()]);
        let result = aggregate(
            &mut EquippedItems::new(equipped),
            &self.base,
            &self.base_with_additional,
        );
        self.active_sets = result.tiers;
        self.equipped_stats = result.stats;
    }
}
