//! Solve status.

use std::fmt;

/// Outcome status of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Unknown,
    ModelInvalid,
    Feasible,
    Infeasible,
    Optimal,
}

impl SolveStatus {
    /// Whether a squad assignment accompanies this status.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Feasible | SolveStatus::Optimal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::ModelInvalid => "MODEL_INVALID",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Optimal => "OPTIMAL",
        }
    }

    /// Human-readable explanation of the status.
    pub fn description(self) -> &'static str {
        match self {
            SolveStatus::Unknown => {
                "The status of the model is still unknown. A search limit has been reached \
                 before any of the statuses below could be determined."
            }
            SolveStatus::ModelInvalid => "The given model didn't pass the validation step.",
            SolveStatus::Feasible => {
                "A feasible solution has been found. But the search was stopped before we \
                 could prove optimality."
            }
            SolveStatus::Infeasible => "The problem has been proven infeasible.",
            SolveStatus::Optimal => "An optimal feasible solution has been found.",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
