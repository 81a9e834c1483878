//! Stat aggregation rules, written once and evaluated two ways.
//!
//! [`aggregate`] runs the six aggregation steps over any [`Loadout`]. The
//! numeric [`EquippedItems`] loadout produces concrete hero stats; the
//! optimizer's symbolic loadout produces linear expressions over equip
//! decision variables. Both share the set-bonus table and step order, so the
//! two evaluations cannot drift apart.
//!
//! 1. `base_with_additional = base + additional sources`
//! 2. `raw = base_with_additional + Σ item stats`
//! 3. `tiers[set] = floor(pieces[set] / threshold[set])`
//! 4. set bonus vector from tiers
//! 5. `equipped = raw + set bonus`
//! 6. percent-to-flat conversion for attack, health, defense and speed,
//!    scaled by the hero's original base stat

use std::ops::{Add, AddAssign, Mul};

use super::item::Item;
use super::set::{PerSet, SetType};
use super::stats::{percent_of, PerStat, Stat, Stats, PERCENT_CONVERSIONS};

/// Channel value the aggregation can be evaluated over.
pub trait StatValue:
    Clone + From<i64> + Add<Output = Self> + AddAssign + Mul<i64, Output = Self>
{
}

impl<T> StatValue for T where
    T: Clone + From<i64> + Add<Output = T> + AddAssign + Mul<i64, Output = T>
{
}

/// Inputs available to the percent-to-flat step.
pub struct Conversion<'a, V> {
    pub percent: Stat,
    pub flat: Stat,
    pub base: &'a Stats,
    pub base_with_additional: &'a Stats,
    /// Stats after step 5.
    pub combined: &'a PerStat<V>,
    pub tiers: &'a PerSet<V>,
}

/// The equipment side of the aggregation: what is (or may be) equipped.
pub trait Loadout {
    type Value: StatValue;

    /// Sum of the stats of every equipped item.
    fn item_stats(&mut self) -> PerStat<Self::Value>;

    /// Number of equipped items of `set`.
    fn set_pieces(&mut self, set: SetType) -> Self::Value;

    /// `floor(pieces / threshold)`.
    fn tiers(&mut self, set: SetType, pieces: Self::Value, threshold: i64) -> Self::Value;

    /// Flat amount added to `conversion.flat` by `conversion.percent`.
    fn percent_bonus(&mut self, conversion: &Conversion<'_, Self::Value>) -> Self::Value;
}

/// Result of an aggregation: final stats plus active tier counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate<V> {
    pub stats: PerStat<V>,
    pub tiers: PerSet<V>,
}

pub fn aggregate<L: Loadout>(
    loadout: &mut L,
    base: &Stats,
    base_with_additional: &Stats,
) -> Aggregate<L::Value> {
    let mut stats = PerStat::from_fn(|stat| L::Value::from(base_with_additional[stat]));
    stats += loadout.item_stats();

    let tiers = PerSet::from_fn(|set| {
        let pieces = loadout.set_pieces(set);
        loadout.tiers(set, pieces, set.threshold())
    });

    stats += set_bonus_stats(&tiers);

    let bonuses: Vec<(Stat, L::Value)> = PERCENT_CONVERSIONS
        .iter()
        .map(|&(percent, flat)| {
            let conversion = Conversion {
                percent,
                flat,
                base,
                base_with_additional,
                combined: &stats,
                tiers: &tiers,
            };
            (flat, loadout.percent_bonus(&conversion))
        })
        .collect();
    for (flat, bonus) in bonuses {
        stats[flat] += bonus;
    }

    Aggregate { stats, tiers }
}

/// Stat vector granted by the given tier counts. Speed and Revenge both
/// feed `SpeedPercent`.
pub fn set_bonus_stats<V: StatValue>(tiers: &PerSet<V>) -> PerStat<V> {
    let mut bonus = PerStat::from(V::from(0));
    for set in SetType::iter() {
        if let Some((stat, per_tier)) = set.bonus().boosted {
            bonus[stat] += tiers[set].clone() * per_tier;
        }
    }
    bonus
}

/// Numeric loadout over concrete equipped items.
pub struct EquippedItems<'a> {
    items: Vec<&'a Item>,
}

impl<'a> EquippedItems<'a> {
    pub fn new<I: IntoIterator<Item = &'a Item>>(items: I) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

impl Loadout for EquippedItems<'_> {
    type Value = i64;

    fn item_stats(&mut self) -> Stats {
        self.items
            .iter()
            .fold(Stats::zero(), |acc, item| acc + *item.stats())
    }

    fn set_pieces(&mut self, set: SetType) -> i64 {
        self.items.iter().filter(|item| item.set() == set).count() as i64
    }

    fn tiers(&mut self, _set: SetType, pieces: i64, threshold: i64) -> i64 {
        pieces.div_euclid(threshold)
    }

    fn percent_bonus(&mut self, c: &Conversion<'_, i64>) -> i64 {
        percent_of(c.combined[c.percent], c.base[c.flat])
    }
}
