//! Gear assignment as an integer program.
//!
//! - [`ProblemBuilder`] turns a roster into equip variables and symbolic
//!   hero stats.
//! - [`SolverDriver`] adds the hard constraints and the weighted objective,
//!   runs a [`Solver`](crate::ports::Solver) and extracts an [`Outcome`].

mod builder;
mod driver;
mod outcome;

pub use builder::{HeroModel, Problem, ProblemBuilder};
pub use driver::{optimize, SolverDriver};
pub use outcome::{HeroResult, Outcome, OutcomeStatus, Solution};
