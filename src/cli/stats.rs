//! `gearopt stats`: hero stats with the gear they currently wear.

use serde::Serialize;

use crate::cli::{load_problem, output, StatsArgs};
use crate::domain::{PerSet, Stats};
use crate::error::Result;

#[derive(Serialize)]
struct HeroStats<'a> {
    name: &'a str,
    stats: &'a Stats,
    active_sets: &'a PerSet<i64>,
}

pub fn execute(args: &StatsArgs) -> Result<()> {
    let problem = load_problem(&args.problem)?;
    let roster = &problem.roster;

    if args.json {
        let heroes: Vec<HeroStats<'_>> = roster
            .heroes()
            .map(|(_, hero)| HeroStats {
                name: hero.name(),
                stats: hero.equipped_stats(),
                active_sets: hero.active_sets(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&heroes)?);
        return Ok(());
    }

    output::section("Current stats");
    output::table(roster.heroes().map(|(_, hero)| {
        output::HeroStatsRow::new(hero.name(), hero.equipped_stats(), hero.active_sets())
    }));
    Ok(())
}
