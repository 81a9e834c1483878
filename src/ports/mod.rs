//! Trait definitions (hexagonal ports). Depend only on domain.

mod solver;

pub use solver::{
    Constraint, ConstraintSense, EngineStatus, IntegerProgram, LinearExpr, RawSolution, Solver,
    SolverSettings, VarId, Variable, VariableKind,
};
