//! Stat model: channels, sets, items, heroes and the roster that links them.

#[macro_use]
mod macros;

mod aggregate;
mod assignment;
mod character;
mod constraints;
mod ids;
mod item;
mod roster;
mod set;
mod stats;

pub use aggregate::{
    aggregate, set_bonus_stats, Aggregate, Conversion, EquippedItems, Loadout, StatValue,
};
pub use assignment::Assignment;
pub use character::{AdditionalSource, AdditionalStats, Character};
pub use constraints::{HeroConstraints, MAX_HERO_WEIGHT, MAX_STAT_WEIGHT};
pub use ids::{HeroId, ItemId};
pub use item::{Item, ItemType, PerSlot};
pub use roster::Roster;
pub use set::{PerSet, SetBonus, SetType};
pub use stats::{
    percent_of, PerStat, Stat, Stats, MAX_STAT_VALUE, MAX_VALUE, PERCENT_CONVERSIONS,
};
