//! Solver adapter interface.

use std::fmt::Debug;
use std::time::Duration;

use sbcforge_model::Model;

use crate::status::SolveStatus;
use crate::termination::StopSignal;

/// Limits handed to a backend for one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveParams {
    pub time_limit: Option<Duration>,
    pub log_progress: bool,
}

/// What a backend returns for one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResponse {
    pub status: SolveStatus,
    /// One value per model variable; empty without a solution.
    pub values: Vec<i64>,
    pub objective: Option<i64>,
    pub wall_time: Duration,
}

impl SolveResponse {
    /// A response without a solution.
    pub fn without_solution(status: SolveStatus, wall_time: Duration) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
            wall_time,
        }
    }
}

/// Receives every incumbent a backend finds.
pub trait IncumbentListener: Sync {
    fn on_incumbent(&self, objective: Option<i64>, values: &[i64]);
}

/// Listener that ignores incumbents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl IncumbentListener for NoopListener {
    fn on_incumbent(&self, _objective: Option<i64>, _values: &[i64]) {}
}

/// Translates a [`Model`] to a concrete backend and runs it.
///
/// Implementations must return promptly once `stop` is raised, reporting
/// the best incumbent found so far as `Feasible` or `Unknown` without one.
pub trait SolverAdapter: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn solve(
        &self,
        model: &Model,
        params: &SolveParams,
        stop: &StopSignal,
        listener: &dyn IncumbentListener,
    ) -> SolveResponse;
}
