//! Equipment set types and the set-bonus table.

use serde::Serialize;

use super::stats::Stat;

keyed_struct! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct PerSet<T> {
        enum SetType;
        fields {
            pub attack, Attack;
            pub defense, Defense;
            pub health, Health;
            pub speed, Speed;
            pub crit, Crit;
            pub destruction, Destruction;
            pub hit, Hit;
            pub resist, Resist;
            pub immunity, Immunity;
            pub rage, Rage;
            pub lifesteal, Lifesteal;
            pub unity, Unity;
            pub revenge, Revenge;
            pub penetration, Penetration;
            pub counter, Counter;
            pub injury, Injury;
        }
    }
}

/// One row of the set-bonus table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SetBonus {
    /// Channel boosted per active tier, with the bonus per tier. `None` for
    /// sets whose effect is not a stat.
    pub boosted: Option<(Stat, i64)>,
    /// Equipped pieces needed per tier.
    pub threshold: i64,
}

impl SetType {
    pub const fn bonus(self) -> SetBonus {
        let (boosted, threshold) = match self {
            SetType::Attack => (Some((Stat::AttackPercent, 45)), 4),
            SetType::Health => (Some((Stat::HealthPercent, 20)), 2),
            SetType::Defense => (Some((Stat::DefensePercent, 20)), 2),
            SetType::Crit => (Some((Stat::CriticalHitChancePercent, 12)), 2),
            SetType::Destruction => (Some((Stat::CriticalHitDamagePercent, 40)), 4),
            SetType::Hit => (Some((Stat::EffectivenessPercent, 20)), 2),
            SetType::Resist => (Some((Stat::EffectResistancePercent, 20)), 2),
            SetType::Speed => (Some((Stat::SpeedPercent, 25)), 4),
            SetType::Revenge => (Some((Stat::SpeedPercent, 12)), 4),
            SetType::Immunity | SetType::Unity | SetType::Penetration => (None, 2),
            SetType::Rage | SetType::Lifesteal | SetType::Counter | SetType::Injury => (None, 4),
        };
        SetBonus { boosted, threshold }
    }

    pub const fn threshold(self) -> i64 {
        self.bonus().threshold
    }

    /// Parses set names as they appear in gear exports: case-insensitive,
    /// with an optional `Set` suffix, and `Critical` for [`SetType::Crit`].
    pub fn parse(name: &str) -> Option<SetType> {
        let trimmed = name.trim();
        let lower = trimmed.to_ascii_lowercase();
        let stem = lower.strip_suffix("set").unwrap_or(lower.as_str());
        if stem == "critical" {
            return Some(SetType::Crit);
        }
        SetType::iter().find(|set| set.name().eq_ignore_ascii_case(stem))
    }
}
