//! Problem files: roster, items and per-hero constraints as TOML or JSON.
//!
//! Stat values arrive as numbers keyed by channel name and are rounded to
//! integers. Everything is validated before a roster is built, and every
//! error names the hero or item it came from.
//!
//! ```toml
//! normalise_weights = true
//!
//! [[heroes]]
//! name = "Arby"
//! base = { Attack = 1000, Health = 5000, Defense = 500, Speed = 100, CriticalHitChancePercent = 15, CriticalHitDamagePercent = 150, EffectivenessPercent = 0, EffectResistancePercent = 0 }
//! artifact = { Attack = 500 }
//! equipped = ["Blade"]
//!
//! [heroes.constraints]
//! min = { Speed = 150 }
//! weights = { Attack = 1 }
//! required_sets = ["Speed"]
//!
//! [[items]]
//! name = "Blade"
//! slot = "Weapon"
//! set = "Speed"
//! stats = { Attack = 200 }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    AdditionalSource, Character, HeroConstraints, HeroId, Item, ItemType, Roster, SetType, Stat,
    Stats, MAX_HERO_WEIGHT, MAX_STAT_VALUE, MAX_STAT_WEIGHT, MAX_VALUE,
};
use crate::error::{ModelingError, Result};

/// Channel name to value.
pub type StatRow = BTreeMap<String, f64>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemFile {
    #[serde(default)]
    pub heroes: Vec<HeroRow>,
    #[serde(default)]
    pub items: Vec<ItemRow>,
    #[serde(default)]
    pub solver: SolverSection,
    /// Multiply stat weights by the per-channel normalisation factors.
    #[serde(default)]
    pub normalise_weights: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroRow {
    pub name: String,
    pub base: StatRow,
    #[serde(default)]
    pub artifact: StatRow,
    #[serde(default)]
    pub exclusive_equipment: StatRow,
    #[serde(default)]
    pub imprint: StatRow,
    #[serde(default)]
    pub additional: StatRow,
    /// Items the hero currently wears.
    #[serde(default)]
    pub equipped: Vec<String>,
    #[serde(default)]
    pub constraints: ConstraintRow,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintRow {
    #[serde(default)]
    pub min: StatRow,
    /// Channels left out default to [`MAX_VALUE`].
    #[serde(default)]
    pub max: StatRow,
    #[serde(default)]
    pub weights: StatRow,
    #[serde(default)]
    pub required_sets: Vec<String>,
    #[serde(default = "default_hero_weight")]
    pub hero_weight: f64,
}

impl Default for ConstraintRow {
    fn default() -> Self {
        Self {
            min: StatRow::new(),
            max: StatRow::new(),
            weights: StatRow::new(),
            required_sets: Vec::new(),
            hero_weight: default_hero_weight(),
        }
    }
}

fn default_hero_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRow {
    pub name: String,
    pub slot: String,
    pub set: String,
    #[serde(default)]
    pub stats: StatRow,
}

/// Solver overrides carried by the problem file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    pub time_limit_secs: Option<u64>,
    pub workers: Option<u32>,
}

/// A validated problem, ready for the optimizer.
#[derive(Debug, Clone)]
pub struct LoadedProblem {
    pub roster: Roster,
    /// One record per hero, in roster order.
    pub constraints: Vec<HeroConstraints>,
    pub solver: SolverSection,
}

impl ProblemFile {
    /// Reads a problem file, picking JSON for `.json` and TOML otherwise.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validates every row and builds the roster. Nothing is built if any
    /// row is rejected.
    pub fn into_problem(self) -> std::result::Result<LoadedProblem, ModelingError> {
        let mut roster = Roster::new();

        for row in &self.items {
            let item = parse_item(row)?;
            roster.add_item(item).map_err(|e| ModelingError::Malformed {
                context: format!("item '{}'", row.name),
                reason: e.to_string(),
            })?;
        }

        let mut constraints = Vec::with_capacity(self.heroes.len());
        for row in &self.heroes {
            let context = format!("hero '{}'", row.name);
            let hero = parse_hero(&context, row, &mut roster)?;
            debug!(hero = %hero, name = %row.name, "loaded hero");
            constraints.push(parse_constraints(&context, &row.constraints, self.normalise_weights)?);
        }

        equip_initial(&self.heroes, &mut roster)?;

        Ok(LoadedProblem {
            roster,
            constraints,
            solver: self.solver,
        })
    }
}

fn parse_item(row: &ItemRow) -> std::result::Result<Item, ModelingError> {
    let context = format!("item '{}'", row.name);
    let slot = ItemType::parse(&row.slot).ok_or_else(|| ModelingError::UnknownSlot {
        context: context.clone(),
        name: row.slot.clone(),
    })?;
    let set = SetType::parse(&row.set).ok_or_else(|| ModelingError::UnknownSet {
        context: context.clone(),
        name: row.set.clone(),
    })?;
    let stats = Stats::from_sparse(parse_stats(&context, &row.stats, MAX_STAT_VALUE)?);
    Ok(Item::new(row.name.clone(), slot, set, stats))
}

fn parse_hero(
    context: &str,
    row: &HeroRow,
    roster: &mut Roster,
) -> std::result::Result<HeroId, ModelingError> {
    let base = parse_stats(context, &row.base, MAX_STAT_VALUE)?;
    for stat in Stat::DISPLAYED {
        if !base.iter().any(|&(s, _)| s == stat) {
            return Err(ModelingError::MissingBaseStat {
                context: context.to_string(),
                stat: stat.to_string(),
            });
        }
    }

    let sources = [
        (AdditionalSource::Artifact, &row.artifact),
        (AdditionalSource::ExclusiveEquipment, &row.exclusive_equipment),
        (AdditionalSource::Imprint, &row.imprint),
        (AdditionalSource::Other, &row.additional),
    ];
    let mut additional = Vec::new();
    for (source, stats) in sources {
        if !stats.is_empty() {
            additional.push((source, Stats::from_sparse(parse_stats(context, stats, MAX_STAT_VALUE)?)));
        }
    }

    let malformed = |e: crate::error::RosterError| ModelingError::Malformed {
        context: context.to_string(),
        reason: e.to_string(),
    };
    let id = roster
        .add_hero(Character::new(row.name.clone(), Stats::from_sparse(base)))
        .map_err(malformed)?;
    for (source, stats) in additional {
        roster
            .set_additional_stats(id, source, stats)
            .map_err(malformed)?;
    }
    Ok(id)
}

fn parse_constraints(
    context: &str,
    row: &ConstraintRow,
    normalise: bool,
) -> std::result::Result<HeroConstraints, ModelingError> {
    let min = Stats::from_sparse(parse_stats(context, &row.min, MAX_VALUE)?);
    let max = Stats::max_with(parse_stats(context, &row.max, MAX_VALUE)?);
    let mut weights = Stats::from_sparse(parse_stats(context, &row.weights, MAX_VALUE)?);
    if normalise {
        weights = weights.normalised();
    }
    if let Some((stat, weight)) = weights.iter().find(|(_, w)| w.abs() > MAX_STAT_WEIGHT) {
        return Err(ModelingError::InvalidValue {
            context: context.to_string(),
            field: stat.to_string(),
            reason: format!("weight {weight} is outside ±{MAX_STAT_WEIGHT}"),
        });
    }

    let mut constraints = HeroConstraints {
        min,
        max,
        weights,
        hero_weight: to_int(context, "hero_weight", row.hero_weight, MAX_VALUE)?,
        ..HeroConstraints::default()
    };
    if !(0..=MAX_HERO_WEIGHT).contains(&constraints.hero_weight) {
        return Err(ModelingError::InvalidValue {
            context: context.to_string(),
            field: "hero_weight".into(),
            reason: format!("must be between 0 and {MAX_HERO_WEIGHT}"),
        });
    }

    for name in &row.required_sets {
        let set = SetType::parse(name).ok_or_else(|| ModelingError::UnknownSet {
            context: context.to_string(),
            name: name.clone(),
        })?;
        constraints.required_sets.insert(set);
    }
    Ok(constraints)
}

/// Puts the listed items on their heroes. Rejects an item listed twice and
/// two items in one slot.
fn equip_initial(rows: &[HeroRow], roster: &mut Roster) -> std::result::Result<(), ModelingError> {
    let mut holders: HashMap<&str, &str> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        let context = format!("hero '{}'", row.name);
        let hero = HeroId::new(index);
        let mut used_slots = Vec::new();
        for name in &row.equipped {
            let item_id = roster
                .item_by_name(name)
                .ok_or_else(|| ModelingError::UnknownItem {
                    context: context.clone(),
                    name: name.clone(),
                })?;
            if let Some(other) = holders.insert(name.as_str(), row.name.as_str()) {
                return Err(ModelingError::Malformed {
                    context: context.clone(),
                    reason: format!("item '{name}' is already equipped by '{other}'"),
                });
            }
            let slot = roster
                .item(item_id)
                .map_err(|e| ModelingError::Malformed {
                    context: context.clone(),
                    reason: e.to_string(),
                })?
                .slot();
            if used_slots.contains(&slot) {
                return Err(ModelingError::SlotMismatch {
                    context: context.clone(),
                    item: name.clone(),
                    slot: slot.to_string(),
                });
            }
            used_slots.push(slot);
            roster
                .equip(hero, item_id)
                .map_err(|e| ModelingError::Malformed {
                    context: context.clone(),
                    reason: e.to_string(),
                })?;
        }
    }
    Ok(())
}

fn parse_stats(
    context: &str,
    row: &StatRow,
    limit: i64,
) -> std::result::Result<Vec<(Stat, i64)>, ModelingError> {
    row.iter()
        .map(|(name, &value)| {
            let stat = Stat::from_name(name)
                .or_else(|| Stat::iter().find(|s| s.name().eq_ignore_ascii_case(name)))
                .ok_or_else(|| ModelingError::UnknownStat {
                    context: context.to_string(),
                    name: name.clone(),
                })?;
            Ok((stat, to_int(context, name, value, limit)?))
        })
        .collect()
}

/// Rounds to the nearest integer, rejecting values beyond `±limit`.
fn to_int(
    context: &str,
    field: &str,
    value: f64,
    limit: i64,
) -> std::result::Result<i64, ModelingError> {
    let invalid = |reason: String| ModelingError::InvalidValue {
        context: context.to_string(),
        field: field.to_string(),
        reason,
    };
    if !value.is_finite() {
        return Err(invalid(format!("{value} is not a finite number")));
    }
    let rounded = value.round();
    if rounded.abs() > limit as f64 {
        return Err(invalid(format!("{value} is outside ±{limit}")));
    }
    Ok(rounded as i64)
}
