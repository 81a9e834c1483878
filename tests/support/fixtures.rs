use std::fs;
use std::path::PathBuf;

use gearopt::domain::{Character, HeroId, Item, ItemId, ItemType, Roster, SetType, Stat, Stats};
use tempfile::TempDir;

/// The eight displayed base channels, as a TOML inline table.
pub const BASE_TOML: &str = "{ Attack = 1000, Health = 5000, Defense = 500, Speed = 100, \
    CriticalHitChancePercent = 15, CriticalHitDamagePercent = 150, \
    EffectivenessPercent = 0, EffectResistancePercent = 0 }";

pub fn base_stats() -> Stats {
    Stats::from_sparse([
        (Stat::Attack, 1000),
        (Stat::Health, 5000),
        (Stat::Defense, 500),
        (Stat::Speed, 100),
        (Stat::CriticalHitChancePercent, 15),
        (Stat::CriticalHitDamagePercent, 150),
    ])
}

/// Builds rosters item by item.
pub struct RosterBuilder {
    roster: Roster,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self {
            roster: Roster::new(),
        }
    }

    pub fn hero(mut self, name: &str, base: Stats) -> Self {
        self.roster
            .add_hero(Character::new(name, base))
            .expect("add hero");
        self
    }

    pub fn item(mut self, name: &str, slot: ItemType, set: SetType, stats: &[(Stat, i64)]) -> Self {
        self.roster
            .add_item(Item::new(
                name,
                slot,
                set,
                Stats::from_sparse(stats.iter().copied()),
            ))
            .expect("add item");
        self
    }

    pub fn build(self) -> Roster {
        self.roster
    }
}

pub fn hero(roster: &Roster, name: &str) -> HeroId {
    roster.hero_by_name(name).expect("hero exists")
}

pub fn item(roster: &Roster, name: &str) -> ItemId {
    roster.item_by_name(name).expect("item exists")
}

/// A file in a fresh temporary directory, removed with the directory.
pub struct TempFile {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn write_temp(name: &str, contents: &str) -> TempFile {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    TempFile { _dir: dir, path }
}
