//! Tagged solve results.

use serde::{Serialize, Serializer};

use crate::domain::{Assignment, HeroId, PerSet, SetType, Stats};

/// Resolved stats of one hero under the winning assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroResult {
    pub hero: HeroId,
    pub name: String,
    pub stats: Stats,
    pub active_sets: PerSet<i64>,
}

impl HeroResult {
    pub fn active_set_types(&self) -> Vec<SetType> {
        SetType::iter().filter(|&set| self.active_sets[set] > 0).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub heroes: Vec<HeroResult>,
    pub assignment: Assignment,
    pub objective: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

/// Result of an optimization run. Infeasible and unknown runs are ordinary
/// outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Best solution proven.
    Optimal(Solution),
    /// Time ran out after a solution was found.
    Feasible(Solution),
    Infeasible,
    /// Time ran out before any solution was found.
    Unknown,
}

impl Outcome {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Outcome::Optimal(_) => OutcomeStatus::Optimal,
            Outcome::Feasible(_) => OutcomeStatus::Feasible,
            Outcome::Infeasible => OutcomeStatus::Infeasible,
            Outcome::Unknown => OutcomeStatus::Unknown,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Optimal(_) => "Optimal solution found",
            Outcome::Feasible(_) => "(potentially) Sub-optimal solution found",
            Outcome::Infeasible => "Solution is infeasible. Please try relaxing your constraints.",
            Outcome::Unknown => {
                "Solution could not be found (likely ran out of time). \
                 Please try extending the search time or relaxing constraints."
            }
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Optimal(solution) | Outcome::Feasible(solution) => Some(solution),
            Outcome::Infeasible | Outcome::Unknown => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solution().is_some()
    }
}

#[derive(Serialize)]
struct OutcomeReport<'a> {
    status: OutcomeStatus,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<&'a Solution>,
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutcomeReport {
            status: self.status(),
            message: self.message(),
            solution: self.solution(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_serializes_without_payload() {
        let json = serde_json::to_value(Outcome::Infeasible).unwrap();
        assert_eq!(json["status"], "INFEASIBLE");
        assert!(json.get("solution").is_none());
        assert!(json["message"].as_str().unwrap().contains("relaxing"));
    }

    #[test]
    fn solved_outcomes_carry_solution() {
        let solution = Solution {
            heroes: vec![],
            assignment: Assignment::new(),
            objective: 42,
        };
        let outcome = Outcome::Feasible(solution.clone());
        assert!(outcome.is_solved());
        assert_eq!(outcome.status(), OutcomeStatus::Feasible);
        assert_eq!(outcome.solution(), Some(&solution));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["solution"]["objective"], 42);
    }
}
