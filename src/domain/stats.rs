//! Stat channels and the fixed-schema stat vector.
//!
//! All values are integers. Percent channels hold whole percentage points
//! (`45` means +45%), which keeps every stat usable in integer-domain solver
//! constraints.

use serde::Serialize;

keyed_struct! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct PerStat<T> {
        enum Stat;
        fields {
            pub attack, Attack;
            pub attack_percent, AttackPercent;
            pub health, Health;
            pub health_percent, HealthPercent;
            pub defense, Defense;
            pub defense_percent, DefensePercent;
            pub critical_hit_chance_percent, CriticalHitChancePercent;
            pub critical_hit_damage_percent, CriticalHitDamagePercent;
            pub effectiveness_percent, EffectivenessPercent;
            pub effect_resistance_percent, EffectResistancePercent;
            pub speed, Speed;
            pub speed_percent, SpeedPercent;
        }
    }
}

/// The integer stat vector used everywhere outside the solver.
pub type Stats = PerStat<i64>;

/// Sentinel upper bound for unset maximum constraints.
pub const MAX_VALUE: i64 = 999_999_999;

/// Largest magnitude accepted for a hero or item stat.
pub const MAX_STAT_VALUE: i64 = 100_000;

/// Percent channels that are converted into flat bonuses, paired with the
/// flat channel they scale.
pub const PERCENT_CONVERSIONS: [(Stat, Stat); 4] = [
    (Stat::AttackPercent, Stat::Attack),
    (Stat::HealthPercent, Stat::Health),
    (Stat::DefensePercent, Stat::Defense),
    (Stat::SpeedPercent, Stat::Speed),
];

impl Stat {
    /// Channels shown to players. The four scaling percent channels are
    /// folded into their flat channel and hidden.
    pub const DISPLAYED: [Stat; 8] = [
        Stat::Attack,
        Stat::Health,
        Stat::Defense,
        Stat::CriticalHitChancePercent,
        Stat::CriticalHitDamagePercent,
        Stat::EffectivenessPercent,
        Stat::EffectResistancePercent,
        Stat::Speed,
    ];

    pub fn is_hidden(self) -> bool {
        PERCENT_CONVERSIONS.iter().any(|&(percent, _)| percent == self)
    }

    /// Weight multiplier that puts one point of this stat on the same scale
    /// as one point of the others, based on maximum gear rolls. One point of
    /// crit chance (40) is worth ten points of attack (4).
    pub fn normalisation(self) -> i64 {
        match self {
            Stat::Attack => 4,
            Stat::Health => 1,
            Stat::Defense => 6,
            Stat::CriticalHitChancePercent => 40,
            Stat::CriticalHitDamagePercent => 29,
            Stat::EffectivenessPercent => 25,
            Stat::EffectResistancePercent => 25,
            Stat::Speed => 51,
            Stat::AttackPercent
            | Stat::HealthPercent
            | Stat::DefensePercent
            | Stat::SpeedPercent => 0,
        }
    }
}

impl Stats {
    pub fn zero() -> Stats {
        Stats::default()
    }

    /// Every channel set to [`MAX_VALUE`], the default for upper bounds.
    pub fn max() -> Stats {
        Stats::from(MAX_VALUE)
    }

    /// Zero vector with the given channels overridden. Later pairs win.
    pub fn from_sparse<I: IntoIterator<Item = (Stat, i64)>>(pairs: I) -> Stats {
        Stats::overridden(Stats::zero(), pairs)
    }

    /// [`Stats::max`] with the given channels overridden.
    pub fn max_with<I: IntoIterator<Item = (Stat, i64)>>(pairs: I) -> Stats {
        Stats::overridden(Stats::max(), pairs)
    }

    fn overridden<I: IntoIterator<Item = (Stat, i64)>>(mut stats: Stats, pairs: I) -> Stats {
        for (stat, value) in pairs {
            stats[stat] = value;
        }
        stats
    }

    pub fn scale(self, k: i64) -> Stats {
        self.map(|_, v| v * k)
    }

    pub fn multiply(self, other: Stats) -> Stats {
        self * other
    }

    pub fn sum(&self) -> i64 {
        self.iter().map(|(_, v)| *v).sum()
    }

    /// Applies the per-channel normalisation factors; hidden channels end
    /// up with weight zero.
    pub fn normalised(self) -> Stats {
        self.map(|stat, v| v * stat.normalisation())
    }
}

/// `floor(percent * base / 100)`, the flat amount a percent bonus adds.
pub fn percent_of(percent: i64, base: i64) -> i64 {
    (percent * base).div_euclid(100)
}
