//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is an open-source mixed-integer programming solver. Division
//! constraints have no native counterpart there, so `q = floor(n / d)` is
//! lowered to the pair `d·q <= n <= d·q + d - 1`, which pins `q` exactly
//! when `q` is integer.
//!
//! Both MIP gap tolerances are set to zero, so an `Optimal` verdict from the
//! engine means the optimum was proven. A solve stopped by the time limit
//! with an incumbent is reported as feasible; one stopped before any
//! incumbent was found is unknown.

use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::solvers::SolutionStatus;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable as LpVariable,
};
use tracing::{debug, warn};

use crate::error::{Result, SolverError};
use crate::ports::{
    Constraint, ConstraintSense, IntegerProgram, LinearExpr, RawSolution, Solver, SolverSettings,
    VariableKind,
};

/// HiGHS-based integer-programming solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&self, program: &IntegerProgram, settings: &SolverSettings) -> Result<RawSolution> {
        if program.has_constant_conflict() {
            debug!("constant constraint violated, skipping engine");
            return Ok(RawSolution::infeasible());
        }

        // Nothing to search
        if program.num_vars() == 0 {
            return Ok(RawSolution::optimal(vec![]));
        }

        let mut vars = variables!();
        let var_list: Vec<LpVariable> = program
            .variables()
            .iter()
            .map(|var| match var.kind {
                VariableKind::Binary => vars.add(variable().binary()),
                VariableKind::Integer { min, max } => {
                    vars.add(variable().integer().min(min as f64).max(max as f64))
                }
            })
            .collect();

        let objective = lower(program.objective(), &var_list);
        let mut model = vars
            .maximise(objective)
            .using(highs)
            .set_option("time_limit", settings.time_limit_secs() as f64)
            .set_option("threads", settings.workers() as i32)
            .set_option("mip_rel_gap", 0.0)
            .set_option("mip_abs_gap", 0.0);

        for c in program.constraints().iter().filter(|c| !c.is_constant()) {
            match c {
                Constraint::Linear {
                    expr, sense, rhs, ..
                } => {
                    let lhs = lower(expr, &var_list);
                    let rhs = *rhs as f64;
                    model = match sense {
                        ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
                        ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
                        ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
                    };
                }
                Constraint::Range { expr, min, max, .. } => {
                    let lhs = lower(expr, &var_list);
                    model = model
                        .with(constraint!(lhs.clone() >= *min as f64))
                        .with(constraint!(lhs <= *max as f64));
                }
                Constraint::Division {
                    quotient,
                    numerator,
                    divisor,
                    ..
                } => {
                    let q = var_list[quotient.index()];
                    let d = *divisor as f64;
                    let n = lower(numerator, &var_list);
                    model = model
                        .with(constraint!(d * q <= n.clone()))
                        .with(constraint!(n <= d * q + (d - 1.0)));
                }
            }
        }

        debug!(
            variables = program.num_vars(),
            constraints = program.constraints().len(),
            time_limit_secs = settings.time_limit_secs(),
            workers = settings.workers(),
            "starting HiGHS"
        );

        let started = Instant::now();
        let result = model.solve();
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "HiGHS finished");

        match result {
            Ok(solution) => {
                let values: Vec<i64> = var_list
                    .iter()
                    .map(|v| solution.value(*v).round() as i64)
                    .collect();
                Ok(verdict(program, solution.status(), values))
            }
            Err(error) => classify(error),
        }
    }
}

/// Tags a point returned by the engine. The point is checked against the
/// program before any verdict is trusted.
fn verdict(program: &IntegerProgram, status: SolutionStatus, values: Vec<i64>) -> RawSolution {
    if !program.is_satisfied_by(&values) {
        warn!("HiGHS returned a point that violates the program");
        return RawSolution::unknown();
    }
    match status {
        SolutionStatus::Optimal => RawSolution::optimal(values),
        SolutionStatus::TimeLimit | SolutionStatus::GapLimit => RawSolution::feasible(values),
    }
}

/// Maps engine errors to verdicts. Only infeasibility and running out of
/// time without an incumbent are verdicts; everything else is a backend
/// failure.
fn classify(error: ResolutionError) -> Result<RawSolution> {
    match error {
        ResolutionError::Infeasible => Ok(RawSolution::infeasible()),
        ResolutionError::Other("NoSolutionFound") => Ok(RawSolution::unknown()),
        other => {
            warn!(error = %other, "HiGHS failed");
            Err(SolverError::Backend(other.to_string()).into())
        }
    }
}

/// Translates an integer expression into a good_lp expression.
fn lower(expr: &LinearExpr, vars: &[LpVariable]) -> Expression {
    let mut lowered: Expression = expr
        .terms()
        .iter()
        .map(|&(var, coefficient)| coefficient as f64 * vars[var.index()])
        .sum();
    lowered += expr.constant_part() as f64;
    lowered
}
