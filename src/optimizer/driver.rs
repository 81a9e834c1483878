//! Hard constraints, the weighted objective and result extraction.

use tracing::{debug, info};

use super::builder::{Problem, ProblemBuilder};
use super::outcome::{HeroResult, Outcome, Solution};
use crate::domain::{
    Assignment, HeroConstraints, ItemType, Roster, Stat, Stats, MAX_HERO_WEIGHT, MAX_STAT_VALUE,
    MAX_STAT_WEIGHT,
};
use crate::error::{ModelingError, Result};
use crate::ports::{Constraint, EngineStatus, LinearExpr, Solver, SolverSettings};

/// Owns the integer program for one run.
///
/// Construction adds every hard constraint and the objective. Call
/// [`SolverDriver::solve`] once to run the engine and read back the result.
#[derive(Debug)]
pub struct SolverDriver<'r> {
    roster: &'r Roster,
    problem: Problem,
}

impl<'r> SolverDriver<'r> {
    /// `constraints[i]` applies to hero `i` of the roster.
    pub fn new(
        roster: &'r Roster,
        constraints: &[HeroConstraints],
    ) -> std::result::Result<Self, ModelingError> {
        if constraints.len() != roster.hero_count() {
            return Err(ModelingError::Malformed {
                context: "constraints".into(),
                reason: format!(
                    "{} constraint records for {} heroes",
                    constraints.len(),
                    roster.hero_count()
                ),
            });
        }
        for ((_, hero), c) in roster.heroes().zip(constraints) {
            if !(0..=MAX_HERO_WEIGHT).contains(&c.hero_weight) {
                return Err(ModelingError::InvalidValue {
                    context: hero.name().to_string(),
                    field: "hero_weight".into(),
                    reason: format!("must be between 0 and {MAX_HERO_WEIGHT}, got {}", c.hero_weight),
                });
            }
            check_magnitudes(hero.name(), "weights", &c.weights, MAX_STAT_WEIGHT)?;
            let additional = hero.additional();
            for (field, stats) in [
                ("base", hero.base_stats()),
                ("artifact", &additional.artifact),
                ("exclusive_equipment", &additional.exclusive_equipment),
                ("imprint", &additional.imprint),
                ("additional", &additional.other),
            ] {
                check_magnitudes(hero.name(), field, stats, MAX_STAT_VALUE)?;
            }
        }
        for (_, item) in roster.items() {
            check_magnitudes(item.name(), "stats", item.stats(), MAX_STAT_VALUE)?;
        }

        let mut driver = Self {
            roster,
            problem: ProblemBuilder::new(roster).build(),
        };
        driver.add_slot_capacity();
        driver.add_exclusive_possession();
        driver.add_stat_bounds(constraints);
        driver.add_required_sets(constraints);
        driver.set_objective(constraints);

        debug!(
            variables = driver.problem.program().num_vars(),
            constraints = driver.problem.program().constraints().len(),
            "integer program ready"
        );
        Ok(driver)
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// At most one item per slot per hero.
    fn add_slot_capacity(&mut self) {
        let roster = self.roster;
        for (hero_id, hero) in roster.heroes() {
            for slot in ItemType::iter() {
                let in_slot: LinearExpr = roster
                    .items()
                    .filter(|(_, item)| item.slot() == slot)
                    .map(|(item_id, _)| LinearExpr::from(self.problem.equip_var(hero_id, item_id)))
                    .sum();
                if in_slot.is_constant() {
                    continue;
                }
                self.problem.program_mut().add_constraint(Constraint::leq(
                    format!("{}_{}_capacity", hero.name(), slot),
                    in_slot,
                    1,
                ));
            }
        }
    }

    /// Each item on at most one hero.
    fn add_exclusive_possession(&mut self) {
        let roster = self.roster;
        for (item_id, item) in roster.items() {
            let holders: LinearExpr = roster
                .heroes()
                .map(|(hero_id, _)| LinearExpr::from(self.problem.equip_var(hero_id, item_id)))
                .sum();
            if holders.is_constant() {
                continue;
            }
            self.problem.program_mut().add_constraint(Constraint::leq(
                format!("{}_possession", item.name()),
                holders,
                1,
            ));
        }
    }

    /// Every channel of every hero within `[min, max]`.
    fn add_stat_bounds(&mut self, constraints: &[HeroConstraints]) {
        for (index, c) in constraints.iter().enumerate() {
            let model = &self.problem.heroes()[index];
            let bounds: Vec<Constraint> = Stat::iter()
                .map(|stat| {
                    Constraint::range(
                        format!("{}_{}_bounds", model.name, stat),
                        model.stats[stat].clone(),
                        c.min[stat],
                        c.max[stat],
                    )
                })
                .collect();
            for bound in bounds {
                self.problem.program_mut().add_constraint(bound);
            }
        }
    }

    /// At least one active tier of every required set.
    fn add_required_sets(&mut self, constraints: &[HeroConstraints]) {
        for (index, c) in constraints.iter().enumerate() {
            let model = &self.problem.heroes()[index];
            let required: Vec<Constraint> = c
                .required_sets
                .iter()
                .map(|&set| {
                    Constraint::geq(
                        format!("{}_{}_required", model.name, set),
                        model.pieces[set].clone(),
                        set.threshold(),
                    )
                })
                .collect();
            for constraint in required {
                self.problem.program_mut().add_constraint(constraint);
            }
        }
    }

    /// Σ heroes Σ channels `stat × stat_weight × hero_weight`.
    fn set_objective(&mut self, constraints: &[HeroConstraints]) {
        let objective: LinearExpr = self
            .problem
            .heroes()
            .iter()
            .zip(constraints)
            .flat_map(|(model, c)| {
                Stat::iter().map(move |stat| model.stats[stat].clone() * (c.weights[stat] * c.hero_weight))
            })
            .sum();
        self.problem.program_mut().maximize(objective);
    }

    /// Runs the engine and extracts the winning assignment.
    pub fn solve(self, solver: &dyn Solver, settings: &SolverSettings) -> Result<Outcome> {
        info!(
            solver = solver.name(),
            heroes = self.problem.hero_count(),
            items = self.problem.item_count(),
            time_limit_secs = settings.time_limit_secs(),
            workers = settings.workers(),
            "solving"
        );

        let raw = solver.solve(self.problem.program(), settings)?;
        let outcome = match (raw.status, raw.values) {
            (EngineStatus::Optimal, Some(values)) => Outcome::Optimal(self.extract(&values)),
            (EngineStatus::Feasible, Some(values)) => Outcome::Feasible(self.extract(&values)),
            (EngineStatus::Infeasible, _) => Outcome::Infeasible,
            _ => Outcome::Unknown,
        };

        info!(status = ?outcome.status(), "{}", outcome.message());
        Ok(outcome)
    }

    fn extract(&self, values: &[i64]) -> Solution {
        let mut assignment = Assignment::new();
        let mut heroes = Vec::with_capacity(self.problem.hero_count());

        for model in self.problem.heroes() {
            let items = self
                .roster
                .items()
                .filter(|(item_id, _)| values[self.problem.equip_var(model.hero, *item_id).index()] == 1)
                .map(|(item_id, _)| item_id)
                .collect();
            assignment.insert(model.hero, items);
            heroes.push(HeroResult {
                hero: model.hero,
                name: model.name.clone(),
                stats: model.stats.clone().map(|_, expr| expr.evaluate(values)),
                active_sets: model.tiers.clone().map(|_, expr| expr.evaluate(values)),
            });
        }

        Solution {
            heroes,
            assignment,
            objective: self.problem.program().objective().evaluate(values),
        }
    }
}

/// Builds, constrains and solves in one call.
pub fn optimize(
    roster: &Roster,
    constraints: &[HeroConstraints],
    solver: &dyn Solver,
    settings: &SolverSettings,
) -> Result<Outcome> {
    SolverDriver::new(roster, constraints)?.solve(solver, settings)
}

/// Rejects any channel of `stats` beyond `±limit`.
fn check_magnitudes(
    context: &str,
    field: &str,
    stats: &Stats,
    limit: i64,
) -> std::result::Result<(), ModelingError> {
    match stats.iter().find(|(_, v)| v.abs() > limit) {
        Some((stat, value)) => Err(ModelingError::InvalidValue {
            context: context.to_string(),
            field: field.to_string(),
            reason: format!("{stat} {value} is outside ±{limit}"),
        }),
        None => Ok(()),
    }
}
