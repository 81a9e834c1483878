//! Solver port for integer programming.
//!
//! The optimizer builds an [`IntegerProgram`] over integer-coefficient
//! [`LinearExpr`]s and hands it to a [`Solver`]. Backends lower the program to
//! their own model type and report an [`EngineStatus`].

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::time::Duration;

use serde::Serialize;

use crate::error::{ConfigError, Result};

/// An integer-programming engine.
///
/// Implementations must be thread-safe (`Send + Sync`). A solve is one
/// blocking call bounded by [`SolverSettings::time_limit`].
pub trait Solver: Send + Sync {
    /// Solver name for logging/config.
    fn name(&self) -> &'static str;

    /// Maximize the program's objective subject to its constraints.
    ///
    /// Infeasibility and running out of time are reported through
    /// [`RawSolution::status`]; `Err` is reserved for backend failures.
    fn solve(&self, program: &IntegerProgram, settings: &SolverSettings) -> Result<RawSolution>;
}

/// Index of a variable within its [`IntegerProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VarId(usize);

impl VarId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// `Σ coefficient × variable + constant` with integer coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(var: VarId, coefficient: i64) -> Self {
        let mut expr = Self::zero();
        expr.add_term(var, coefficient);
        expr
    }

    pub fn add_term(&mut self, var: VarId, coefficient: i64) {
        if coefficient != 0 {
            self.terms.push((var, coefficient));
        }
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant_part(&self) -> i64 {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `values`, indexed by [`VarId`].
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * values[var.index()])
            .sum::<i64>()
            + self.constant
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        Self::term(var, 1)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, other: LinearExpr) -> LinearExpr {
        self += other;
        self
    }
}

impl AddAssign for LinearExpr {
    fn add_assign(&mut self, other: LinearExpr) {
        self.terms.extend(other.terms);
        self.constant += other.constant;
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, k: i64) -> LinearExpr {
        if k == 0 {
            return LinearExpr::zero();
        }
        for (_, coefficient) in &mut self.terms {
            *coefficient *= k;
        }
        self.constant *= k;
        self
    }
}

impl Sum for LinearExpr {
    fn sum<I: Iterator<Item = LinearExpr>>(iter: I) -> Self {
        iter.fold(LinearExpr::zero(), Add::add)
    }
}

/// Domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Binary,
    Integer { min: i64, max: i64 },
}

impl VariableKind {
    pub fn bounds(self) -> (i64, i64) {
        match self {
            VariableKind::Binary => (0, 1),
            VariableKind::Integer { min, max } => (min, max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintSense {
    GreaterEqual,
    LessEqual,
    Equal,
}

/// A single constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `expr {>=, <=, =} rhs`.
    Linear {
        label: String,
        expr: LinearExpr,
        sense: ConstraintSense,
        rhs: i64,
    },
    /// `min <= expr <= max`.
    Range {
        label: String,
        expr: LinearExpr,
        min: i64,
        max: i64,
    },
    /// `quotient = floor(numerator / divisor)` with `divisor > 0`.
    Division {
        label: String,
        quotient: VarId,
        numerator: LinearExpr,
        divisor: i64,
    },
}

impl Constraint {
    pub fn leq(label: impl Into<String>, expr: LinearExpr, rhs: i64) -> Self {
        Constraint::Linear {
            label: label.into(),
            expr,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    pub fn geq(label: impl Into<String>, expr: LinearExpr, rhs: i64) -> Self {
        Constraint::Linear {
            label: label.into(),
            expr,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    pub fn range(label: impl Into<String>, expr: LinearExpr, min: i64, max: i64) -> Self {
        Constraint::Range {
            label: label.into(),
            expr,
            min,
            max,
        }
    }

    pub fn division(
        label: impl Into<String>,
        quotient: VarId,
        numerator: LinearExpr,
        divisor: i64,
    ) -> Self {
        Constraint::Division {
            label: label.into(),
            quotient,
            numerator,
            divisor,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Constraint::Linear { label, .. }
            | Constraint::Range { label, .. }
            | Constraint::Division { label, .. } => label,
        }
    }

    /// Whether the constraint mentions no variable at all.
    pub fn is_constant(&self) -> bool {
        match self {
            Constraint::Linear { expr, .. } | Constraint::Range { expr, .. } => expr.is_constant(),
            Constraint::Division { .. } => false,
        }
    }

    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        match self {
            Constraint::Linear {
                expr, sense, rhs, ..
            } => {
                let lhs = expr.evaluate(values);
                match sense {
                    ConstraintSense::GreaterEqual => lhs >= *rhs,
                    ConstraintSense::LessEqual => lhs <= *rhs,
                    ConstraintSense::Equal => lhs == *rhs,
                }
            }
            Constraint::Range { expr, min, max, .. } => {
                (*min..=*max).contains(&expr.evaluate(values))
            }
            Constraint::Division {
                quotient,
                numerator,
                divisor,
                ..
            } => values[quotient.index()] == numerator.evaluate(values).div_euclid(*divisor),
        }
    }
}

/// A maximization problem over bounded integer variables.
#[derive(Debug, Clone, Default)]
pub struct IntegerProgram {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl IntegerProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_variable(name.into(), VariableKind::Binary)
    }

    pub fn add_integer(&mut self, name: impl Into<String>, min: i64, max: i64) -> VarId {
        self.push_variable(name.into(), VariableKind::Integer { min, max })
    }

    fn push_variable(&mut self, name: String, kind: VariableKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable { name, kind });
        id
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn maximize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Whether a constraint with no variables already rules every
    /// assignment out.
    pub fn has_constant_conflict(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| c.is_constant() && !c.is_satisfied_by(&[]))
    }

    /// Checks variable bounds and every constraint.
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let in_bounds = self.variables.iter().zip(values).all(|(var, &value)| {
            let (min, max) = var.kind.bounds();
            (min..=max).contains(&value)
        });
        in_bounds && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}

/// Engine-level verdict on a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineStatus {
    /// Best solution proven.
    Optimal,
    /// Solution found but optimality not proven within the time limit.
    Feasible,
    /// The constraints cannot all hold.
    Infeasible,
    /// No solution found, typically because the time limit ran out.
    Unknown,
}

/// Result of a solve. `values` is present for `Optimal` and `Feasible`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSolution {
    pub status: EngineStatus,
    pub values: Option<Vec<i64>>,
}

impl RawSolution {
    pub fn optimal(values: Vec<i64>) -> Self {
        Self {
            status: EngineStatus::Optimal,
            values: Some(values),
        }
    }

    pub fn feasible(values: Vec<i64>) -> Self {
        Self {
            status: EngineStatus::Feasible,
            values: Some(values),
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: EngineStatus::Infeasible,
            values: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            status: EngineStatus::Unknown,
            values: None,
        }
    }
}

/// Time limit and worker count for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverSettings {
    time_limit_secs: u64,
    workers: u32,
}

impl SolverSettings {
    pub const DEFAULT_TIME_LIMIT_SECS: u64 = 60;
    pub const DEFAULT_WORKERS: u32 = 8;
    pub const TIME_LIMIT_RANGE: (u64, u64) = (1, 1000);
    pub const WORKER_RANGE: (u32, u32) = (1, 10);

    pub fn new(time_limit_secs: u64, workers: u32) -> std::result::Result<Self, ConfigError> {
        let (min_secs, max_secs) = Self::TIME_LIMIT_RANGE;
        if !(min_secs..=max_secs).contains(&time_limit_secs) {
            return Err(ConfigError::InvalidValue {
                field: "time_limit_secs",
                reason: format!("must be between {min_secs} and {max_secs}, got {time_limit_secs}"),
            });
        }
        let (min_workers, max_workers) = Self::WORKER_RANGE;
        if !(min_workers..=max_workers).contains(&workers) {
            return Err(ConfigError::InvalidValue {
                field: "workers",
                reason: format!("must be between {min_workers} and {max_workers}, got {workers}"),
            });
        }
        Ok(Self {
            time_limit_secs,
            workers,
        })
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_secs
    }

    pub fn workers(&self) -> u32 {
        self.workers
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: Self::DEFAULT_TIME_LIMIT_SECS,
            workers: Self::DEFAULT_WORKERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_arithmetic() {
        let mut program = IntegerProgram::new();
        let x = program.add_binary("x");
        let y = program.add_integer("y", 0, 5);

        let expr = (LinearExpr::from(x) * 3 + LinearExpr::term(y, 2) + LinearExpr::from(7)) * 2;
        assert_eq!(expr.evaluate(&[1, 4]), 2 * (3 + 8 + 7));
        assert_eq!(expr.constant_part(), 14);
        assert!((expr * 0).is_constant());
    }

    #[test]
    fn division_constraint_floors() {
        let mut program = IntegerProgram::new();
        let n = program.add_integer("n", 0, 10);
        let q = program.add_integer("q", 0, 5);
        let c = Constraint::division("tiers", q, n.into(), 4);
        assert!(c.is_satisfied_by(&[7, 1]));
        assert!(c.is_satisfied_by(&[8, 2]));
        assert!(!c.is_satisfied_by(&[3, 1]));
    }

    #[test]
    fn program_checks_bounds_and_constraints() {
        let mut program = IntegerProgram::new();
        let x = program.add_binary("x");
        let y = program.add_binary("y");
        program.add_constraint(Constraint::leq("cap", LinearExpr::from(x) + y.into(), 1));

        assert!(program.is_satisfied_by(&[1, 0]));
        assert!(!program.is_satisfied_by(&[1, 1]));
        assert!(!program.is_satisfied_by(&[2, 0]));
        assert!(!program.is_satisfied_by(&[1]));
    }

    #[test]
    fn constant_conflicts_are_detected() {
        let mut program = IntegerProgram::new();
        program.add_constraint(Constraint::range("speed", LinearExpr::constant(100), 0, 999));
        assert!(!program.has_constant_conflict());
        program.add_constraint(Constraint::range("attack", LinearExpr::constant(100), 200, 999));
        assert!(program.has_constant_conflict());
    }

    #[test]
    fn settings_are_range_checked() {
        assert!(SolverSettings::new(1, 1).is_ok());
        assert!(SolverSettings::new(1000, 10).is_ok());
        assert!(matches!(
            SolverSettings::new(0, 8),
            Err(ConfigError::InvalidValue { field: "time_limit_secs", .. })
        ));
        assert!(matches!(
            SolverSettings::new(60, 11),
            Err(ConfigError::InvalidValue { field: "workers", .. })
        ));
        let default = SolverSettings::default();
        assert_eq!(default.time_limit(), Duration::from_secs(60));
        assert_eq!(default.workers(), 8);
    }
}
