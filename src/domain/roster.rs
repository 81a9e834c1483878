//! Owns every hero and item and keeps the two-way equip links consistent.
//!
//! Heroes point at items through their slots and items point back at their
//! holder. Both ends are plain ids into the roster's tables, so the only way
//! to change either end is through [`Roster::equip`] and
//! [`Roster::unequip`], which update both ends and recompute the heroes
//! involved.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::assignment::Assignment;
use super::character::{AdditionalSource, Character};
use super::ids::{HeroId, ItemId};
use super::item::{Item, ItemType, PerSlot};
use super::stats::Stats;
use crate::error::RosterError;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    heroes: Vec<Character>,
    items: Vec<Item>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unequipped hero. Names are unique within a roster.
    pub fn add_hero(&mut self, hero: Character) -> Result<HeroId, RosterError> {
        if self.hero_by_name(hero.name()).is_some() {
            return Err(RosterError::DuplicateHero(hero.name().to_string()));
        }
        let id = HeroId::new(self.heroes.len());
        self.heroes.push(hero);
        Ok(id)
    }

    /// Adds an unequipped item. Names are unique within a roster.
    pub fn add_item(&mut self, item: Item) -> Result<ItemId, RosterError> {
        if self.item_by_name(item.name()).is_some() {
            return Err(RosterError::DuplicateItem(item.name().to_string()));
        }
        let id = ItemId::new(self.items.len());
        self.items.push(item);
        Ok(id)
    }

    pub fn hero(&self, id: HeroId) -> Result<&Character, RosterError> {
        self.heroes
            .get(id.index())
            .ok_or(RosterError::UnknownHero(id))
    }

    pub fn item(&self, id: ItemId) -> Result<&Item, RosterError> {
        self.items.get(id.index()).ok_or(RosterError::UnknownItem(id))
    }

    pub fn heroes(&self) -> impl Iterator<Item = (HeroId, &Character)> {
        self.heroes
            .iter()
            .enumerate()
            .map(|(i, hero)| (HeroId::new(i), hero))
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId::new(i), item))
    }

    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn hero_by_name(&self, name: &str) -> Option<HeroId> {
        self.heroes
            .iter()
            .position(|hero| hero.name() == name)
            .map(HeroId::new)
    }

    pub fn item_by_name(&self, name: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.name() == name)
            .map(ItemId::new)
    }

    /// Equips `item_id` on `hero_id` in the item's slot.
    ///
    /// The hero's current occupant of that slot is detached, and if another
    /// hero held the item it loses it and is recomputed.
    pub fn equip(&mut self, hero_id: HeroId, item_id: ItemId) -> Result<(), RosterError> {
        self.hero(hero_id)?;
        let slot = self.item(item_id)?.slot();

        if let Some(occupant) = self.heroes[hero_id.index()].equipped_in(slot) {
            if occupant == item_id {
                return Ok(());
            }
            self.items[occupant.index()].detach();
        }

        self.heroes[hero_id.index()].set_slot(slot, Some(item_id));
        let previous = self.items[item_id.index()].equip_to(hero_id);

        if let Some(previous) = previous.filter(|&p| p != hero_id) {
            let holder = &mut self.heroes[previous.index()];
            if holder.equipped_in(slot) == Some(item_id) {
                holder.set_slot(slot, None);
            }
            holder.recompute(&self.items);
            debug!(item = %item_id, from = %previous, to = %hero_id, "moved item between heroes");
        }

        self.heroes[hero_id.index()].recompute(&self.items);
        Ok(())
    }

    /// Removes `item_id` from `hero_id`. Returns `false` and leaves both
    /// untouched when the hero does not hold that item.
    pub fn unequip(&mut self, hero_id: HeroId, item_id: ItemId) -> Result<bool, RosterError> {
        self.hero(hero_id)?;
        let slot = self.item(item_id)?.slot();

        let hero = &mut self.heroes[hero_id.index()];
        if hero.equipped_in(slot) != Some(item_id) {
            warn!(
                hero = hero.name(),
                item = self.items[item_id.index()].name(),
                "unequip requested for an item the hero does not hold"
            );
            return Ok(false);
        }

        hero.set_slot(slot, None);
        let item = &mut self.items[item_id.index()];
        if item.equipped_to() == Some(hero_id) {
            item.detach();
        }
        hero.recompute(&self.items);
        Ok(true)
    }

    /// Strips every hero bare.
    pub fn unequip_all(&mut self) {
        for item in &mut self.items {
            item.detach();
        }
        for hero in &mut self.heroes {
            for slot in ItemType::iter() {
                hero.set_slot(slot, None);
            }
            hero.recompute(&self.items);
        }
    }

    pub fn set_additional_stats(
        &mut self,
        hero_id: HeroId,
        source: AdditionalSource,
        stats: Stats,
    ) -> Result<(), RosterError> {
        self.hero(hero_id)?;
        let hero = &mut self.heroes[hero_id.index()];
        hero.set_additional(source, stats);
        hero.recompute(&self.items);
        Ok(())
    }

    /// Replaces the current equipment with `assignment`. Heroes absent from
    /// the assignment end up bare.
    pub fn apply_assignment(&mut self, assignment: &Assignment) -> Result<(), RosterError> {
        for (hero, items) in assignment.iter() {
            self.hero(hero)?;
            for &item in items {
                self.item(item)?;
            }
        }
        self.unequip_all();
        for (hero, items) in assignment.iter() {
            for &item in items {
                self.equip(hero, item)?;
            }
        }
        Ok(())
    }

    /// The items a hero holds, by slot.
    pub fn equipment_table(&self, hero_id: HeroId) -> Result<PerSlot<Option<&Item>>, RosterError> {
        let hero = self.hero(hero_id)?;
        Ok(PerSlot::from_fn(|slot| {
            hero.equipped_in(slot).map(|id| &self.items[id.index()])
        }))
    }

    /// Current equipment as an assignment.
    pub fn current_assignment(&self) -> Assignment {
        let mut assignment = Assignment::new();
        for (id, hero) in self.heroes() {
            assignment.insert(id, hero.equipped_items().collect());
        }
        assignment
    }

    /// Whether every hero slot and item back reference agree with each other.
    pub fn links_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        for (hero_id, hero) in self.heroes() {
            for (slot, equipped) in hero.equipment().iter() {
                let Some(item_id) = *equipped else { continue };
                let Some(item) = self.items.get(item_id.index()) else {
                    return false;
                };
                if item.slot() != slot || item.equipped_to() != Some(hero_id) {
                    return false;
                }
                if !seen.insert(item_id) {
                    return false;
                }
            }
        }
        self.items()
            .filter(|(_, item)| item.is_equipped())
            .all(|(id, _)| seen.contains(&id))
    }
}
