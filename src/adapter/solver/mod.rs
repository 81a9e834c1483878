//! Solver implementations for integer programming.
//!
//! Implements the `ports::Solver` trait with concrete backends.

mod highs;

pub use highs::HiGHSSolver;
