use std::collections::BTreeMap;

use serde::Serialize;

use super::ids::{HeroId, ItemId};

/// Which items each hero holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignment {
    heroes: BTreeMap<HeroId, Vec<ItemId>>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hero: HeroId, mut items: Vec<ItemId>) {
        items.sort();
        self.heroes.insert(hero, items);
    }

    pub fn items_for(&self, hero: HeroId) -> &[ItemId] {
        self.heroes.get(&hero).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeroId, &[ItemId])> {
        self.heroes.iter().map(|(&hero, items)| (hero, items.as_slice()))
    }
}
