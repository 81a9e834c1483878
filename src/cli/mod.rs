//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod solve;
pub mod stats;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use crate::input::{LoadedProblem, ProblemFile, SolverSection};
use crate::ports::SolverSettings;

/// gearopt - assign gear to heroes by integer programming.
#[derive(Parser, Debug)]
#[command(name = "gearopt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the best gear assignment for a problem file
    Solve(SolveArgs),

    /// Validate a problem file without solving it
    Check(ProblemArg),

    /// Show hero stats with the gear they currently wear
    Stats(StatsArgs),
}

/// Shared argument for commands that only need a problem file.
#[derive(Parser, Debug)]
pub struct ProblemArg {
    /// Problem file (.toml or .json)
    pub problem: PathBuf,
}

/// Arguments for the `solve` subcommand.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Problem file (.toml or .json)
    pub problem: PathBuf,

    /// Override solver time limit in seconds (1-1000)
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Override solver worker threads (1-10)
    #[arg(long)]
    pub workers: Option<u32>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` subcommand.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Problem file (.toml or .json)
    pub problem: PathBuf,

    /// Print stats as JSON
    #[arg(long)]
    pub json: bool,
}

/// Reads and validates a problem file.
pub(crate) fn load_problem(path: &Path) -> Result<LoadedProblem> {
    Ok(ProblemFile::load(path)?.into_problem()?)
}

/// Config defaults, then the problem file, then command-line flags.
pub(crate) fn resolve_settings(
    config: &Config,
    problem: &SolverSection,
    time_limit: Option<u64>,
    workers: Option<u32>,
) -> Result<SolverSettings> {
    let time_limit_secs = time_limit
        .or(problem.time_limit_secs)
        .unwrap_or(config.solver.time_limit_secs);
    let workers = workers.or(problem.workers).unwrap_or(config.solver.workers);
    Ok(SolverSettings::new(time_limit_secs, workers)?)
}
