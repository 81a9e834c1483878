use std::collections::BTreeSet;

use super::set::SetType;
use super::stats::Stats;

/// Highest accepted hero weight.
pub const MAX_HERO_WEIGHT: i64 = 10;

/// Largest magnitude accepted for a stat weight, after normalisation.
pub const MAX_STAT_WEIGHT: i64 = 10_000;

/// Per-hero requirements and preferences for one optimization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroConstraints {
    /// Inclusive lower bound per channel.
    pub min: Stats,
    /// Inclusive upper bound per channel.
    pub max: Stats,
    /// Objective weight per channel, already normalised by the caller.
    pub weights: Stats,
    /// Sets that must have at least one active tier.
    pub required_sets: BTreeSet<SetType>,
    /// Multiplies every weighted stat of this hero in the objective. Zero
    /// removes the hero from the objective while its bounds still apply.
    pub hero_weight: i64,
}

impl Default for HeroConstraints {
    fn default() -> Self {
        Self {
            min: Stats::zero(),
            max: Stats::max(),
            weights: Stats::zero(),
            required_sets: BTreeSet::new(),
            hero_weight: 1,
        }
    }
}

impl HeroConstraints {
    /// Unbounded constraints with the given stat weights.
    pub fn weighted(weights: Stats) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn with_min(mut self, min: Stats) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: Stats) -> Self {
        self.max = max;
        self
    }

    pub fn with_required_set(mut self, set: SetType) -> Self {
        self.required_sets.insert(set);
        self
    }

    pub fn with_hero_weight(mut self, hero_weight: i64) -> Self {
        self.hero_weight = hero_weight;
        self
    }
}
