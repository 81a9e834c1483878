//! `gearopt solve`: optimize and print the winning assignment.

use tabled::Tabled;
use tracing::info;

use crate::adapter::solver::HiGHSSolver;
use crate::cli::{load_problem, output, resolve_settings, SolveArgs};
use crate::config::Config;
use crate::domain::{ItemType, Roster};
use crate::error::Result;
use crate::optimizer::{optimize, Outcome, Solution};

#[derive(Tabled)]
struct EquipmentRow {
    #[tabled(rename = "Slot")]
    slot: ItemType,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Set")]
    set: String,
    #[tabled(rename = "Stats")]
    stats: String,
}

/// Runs the optimizer. Returns whether a solution was found.
pub fn execute(args: &SolveArgs, config: &Config) -> Result<bool> {
    let problem = load_problem(&args.problem)?;
    let settings = resolve_settings(config, &problem.solver, args.time_limit, args.workers)?;
    info!(problem = %args.problem.display(), "loaded problem");

    let outcome = optimize(&problem.roster, &problem.constraints, &HiGHSSolver::new(), &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(outcome.is_solved());
    }

    output::section("Result");
    output::key_value("Status", format!("{:?}", outcome.status()));
    output::key_value("Message", outcome.message());

    match &outcome {
        Outcome::Optimal(solution) | Outcome::Feasible(solution) => {
            print_solution(&problem.roster, solution)?;
            output::ok(outcome.message());
        }
        Outcome::Infeasible | Outcome::Unknown => output::warn(outcome.message()),
    }
    Ok(outcome.is_solved())
}

fn print_solution(roster: &Roster, solution: &Solution) -> Result<()> {
    output::key_value("Objective", solution.objective);

    output::section("Hero stats");
    output::table(
        solution
            .heroes
            .iter()
            .map(|hero| output::HeroStatsRow::new(&hero.name, &hero.stats, &hero.active_sets)),
    );

    let mut equipped = roster.clone();
    equipped.apply_assignment(&solution.assignment)?;
    for result in &solution.heroes {
        output::section(&format!("{} equipment", result.name));
        let table = equipped.equipment_table(result.hero)?;
        output::table(table.iter().map(|(slot, &item)| EquipmentRow {
            slot,
            item: item.map_or_else(|| "-".into(), |i| i.name().to_string()),
            set: item.map_or_else(|| "-".into(), |i| i.set().to_string()),
            stats: item.map_or_else(String::new, |i| output::stat_summary(i.stats())),
        }));
    }
    Ok(())
}
