//! `gearopt check`: validate a problem file without solving it.

use crate::cli::{load_problem, output, resolve_settings, ProblemArg};
use crate::config::Config;
use crate::error::Result;
use crate::optimizer::SolverDriver;

/// Loads the problem, builds the integer program and reports its size.
pub fn execute(args: &ProblemArg, config: &Config) -> Result<()> {
    println!("Checking problem: {}", args.problem.display());

    let problem = load_problem(&args.problem)?;
    output::ok("Problem file is valid");

    let settings = resolve_settings(config, &problem.solver, None, None)?;
    let driver = SolverDriver::new(&problem.roster, &problem.constraints)?;
    let program = driver.problem().program();
    output::ok("Integer program builds");

    output::section("Summary");
    output::key_value("Heroes", problem.roster.hero_count());
    output::key_value("Items", problem.roster.item_count());
    output::key_value("Variables", program.num_vars());
    output::key_value("Constraints", program.constraints().len());
    output::key_value("Time limit", format!("{}s", settings.time_limit_secs()));
    output::key_value("Workers", settings.workers());

    if program.has_constant_conflict() {
        output::warn("Some stat bounds can never be met; solving will report infeasible");
    }
    Ok(())
}
