//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use tabled::{Table, Tabled};

use crate::domain::{PerSet, SetType, Stat, Stats};

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<14} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("⚠ {message}");
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}

/// Print rows as an indented table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {line}");
    }
}

/// One row per hero with the displayed channels.
#[derive(Tabled)]
pub struct HeroStatsRow {
    #[tabled(rename = "Hero")]
    pub name: String,
    #[tabled(rename = "Atk")]
    pub attack: i64,
    #[tabled(rename = "HP")]
    pub health: i64,
    #[tabled(rename = "Def")]
    pub defense: i64,
    #[tabled(rename = "CC%")]
    pub crit_chance: i64,
    #[tabled(rename = "CD%")]
    pub crit_damage: i64,
    #[tabled(rename = "Eff%")]
    pub effectiveness: i64,
    #[tabled(rename = "Res%")]
    pub resistance: i64,
    #[tabled(rename = "Spd")]
    pub speed: i64,
    #[tabled(rename = "Sets")]
    pub sets: String,
}

impl HeroStatsRow {
    pub fn new(name: &str, stats: &Stats, tiers: &PerSet<i64>) -> Self {
        Self {
            name: name.to_string(),
            attack: stats.attack,
            health: stats.health,
            defense: stats.defense,
            crit_chance: stats.critical_hit_chance_percent,
            crit_damage: stats.critical_hit_damage_percent,
            effectiveness: stats.effectiveness_percent,
            resistance: stats.effect_resistance_percent,
            speed: stats.speed,
            sets: set_summary(tiers),
        }
    }
}

/// `Speed, Crit x2` style list of active sets.
pub fn set_summary(tiers: &PerSet<i64>) -> String {
    let active: Vec<String> = SetType::iter()
        .filter(|&set| tiers[set] > 0)
        .map(|set| match tiers[set] {
            1 => set.to_string(),
            n => format!("{set} x{n}"),
        })
        .collect();
    if active.is_empty() {
        "-".into()
    } else {
        active.join(", ")
    }
}

/// Non-zero channels as `Attack 200, Speed 4`.
pub fn stat_summary(stats: &Stats) -> String {
    let parts: Vec<String> = Stat::iter()
        .filter(|&stat| stats[stat] != 0)
        .map(|stat| format!("{stat} {}", stats[stat]))
        .collect();
    parts.join(", ")
}
