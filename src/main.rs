use std::process::ExitCode;

use clap::Parser;
use gearopt::cli::{self, output, Cli, Commands};
use gearopt::config::Config;
use tracing::error;

/// Exit status when the solver ran but found no solution.
const NO_SOLUTION: u8 = 2;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "command failed");
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.init_logging();

    match args.command {
        Commands::Solve(solve) => {
            let solved = cli::solve::execute(&solve, &config)?;
            Ok(if solved {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(NO_SOLUTION)
            })
        }
        Commands::Check(check) => {
            cli::check::execute(&check, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Stats(stats) => {
            cli::stats::execute(&stats)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
