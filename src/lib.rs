//! gearopt - gear assignment for role-playing game rosters.
//!
//! Given heroes, a pool of equipment and per-hero requirements, gearopt finds
//! the assignment of items to heroes that maximizes a weighted sum of the
//! heroes' final stats, subject to stat bounds, required sets and slot rules.
//!
//! # Architecture
//!
//! - **`domain`** - Stat vectors, sets, items, heroes and the roster that
//!   links them, plus the stat aggregation rules
//! - **`optimizer`** - Integer-program formulation
//!   - `ProblemBuilder` - equip variables and symbolic hero stats
//!   - `SolverDriver` - hard constraints, objective, result extraction
//! - **`ports`** - Solver trait and the integer-program IR
//! - **`adapter::solver`** - `HiGHSSolver`, HiGHS via good_lp
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Stat model and roster bookkeeping
//! - [`error`] - Error types for the crate
//! - [`input`] - Problem files (TOML or JSON)
//! - [`optimizer`] - Problem construction and solving
//!
//! # Example
//!
//! ```no_run
//! use gearopt::adapter::solver::HiGHSSolver;
//! use gearopt::input::ProblemFile;
//! use gearopt::optimizer::optimize;
//! use gearopt::ports::SolverSettings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let problem = ProblemFile::load("team.toml")?.into_problem()?;
//!     let outcome = optimize(
//!         &problem.roster,
//!         &problem.constraints,
//!         &HiGHSSolver::new(),
//!         &SolverSettings::default(),
//!     )?;
//!     println!("{}", outcome.message());
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod optimizer;
pub mod ports;
