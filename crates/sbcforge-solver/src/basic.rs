//! Compile, solve and extract one squad.
//!
//! Logging levels:
//! - **INFO**: Solve start/end, watchdog stops
//! - **DEBUG**: Backend lifecycle
//! - **WARN**: Compile failures, unresolved identities

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use sbcforge_config::{RuleConfig, SolveSettings};
use sbcforge_core::{Roster, SbcError};
use sbcforge_model::{compile, CompiledModel};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::adapter::{IncumbentListener, SolveParams, SolverAdapter};
use crate::backend::MicrolpAdapter;
use crate::extract::{extract, Assignment};
use crate::status::SolveStatus;
use crate::termination::{ExternalTermination, OrTermination, SolveScope, StopSignal};
use crate::watchdog::StagnationWatchdog;

/// Default time limit in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Result of one squad solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadOutcome {
    pub status: SolveStatus,
    pub assignment: Option<Assignment>,
    /// Fixed identities absent from the roster.
    pub missing_fixed: Vec<String>,
    /// Removed identities absent from the roster.
    pub missing_removed: Vec<String>,
    /// Compile error behind a `ModelInvalid` status.
    pub error: Option<String>,
    pub wall_time: Duration,
}

impl SquadOutcome {
    fn failed(err: &SbcError, wall_time: Duration) -> Self {
        let status = match err {
            SbcError::Cancelled => SolveStatus::Unknown,
            _ => SolveStatus::ModelInvalid,
        };
        Self {
            status,
            assignment: None,
            missing_fixed: Vec::new(),
            missing_removed: Vec::new(),
            error: Some(err.to_string()),
            wall_time,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.assignment.is_some()
    }
}

/// Solves `roster` under `rules` with the microlp backend.
///
/// # Example
///
/// ```
/// use sbcforge_config::{RuleConfig, SolveSettings};
/// use sbcforge_core::{Candidate, Roster};
/// use sbcforge_solver::{run_solver, SolveStatus};
///
/// let roster: Roster = [("Keeper", "GK", 200), ("Back", "CB", 150), ("Spare", "CB", 90)]
///     .iter()
///     .map(|(name, role, cost)| Candidate::new(*name, "Club", "League", "Nation", *role, 75, *cost))
///     .collect();
/// let rules = RuleConfig::new().with_custom_formation(["GK", "CB"]).with_squad_size(2);
///
/// let outcome = run_solver(&roster, &rules, &SolveSettings::default());
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// assert_eq!(outcome.assignment.unwrap().indices(), vec![0, 2]);
/// ```
pub fn run_solver(roster: &Roster, rules: &RuleConfig, settings: &SolveSettings) -> SquadOutcome {
    run_solver_with(&MicrolpAdapter::new(), roster, rules, settings, &StopSignal::new())
}

/// Solves with a chosen backend; raising `stop` ends the solve early.
pub fn run_solver_with(
    adapter: &dyn SolverAdapter,
    roster: &Roster,
    rules: &RuleConfig,
    settings: &SolveSettings,
    stop: &StopSignal,
) -> SquadOutcome {
    // Create a channel but ignore the receiver - no streaming needed
    let (sender, _receiver) = mpsc::unbounded_channel();
    run_solver_with_channel(adapter, roster, rules, settings, stop, sender)
}

/// Solves with incumbent streaming.
///
/// Every improving incumbent the backend reports is extracted and sent
/// through the channel as it arrives.
pub fn run_solver_with_channel(
    adapter: &dyn SolverAdapter,
    roster: &Roster,
    rules: &RuleConfig,
    settings: &SolveSettings,
    stop: &StopSignal,
    sender: mpsc::UnboundedSender<Assignment>,
) -> SquadOutcome {
    let started = Instant::now();
    match compile(roster, rules) {
        Ok(compiled) => solve_with(adapter, roster, &compiled, settings, stop, Some(&sender)),
        Err(err) => {
            warn!(event = "compile_failed", error = %err);
            SquadOutcome::failed(&err, started.elapsed())
        }
    }
}

/// Solves an already compiled model.
pub fn solve_compiled(
    adapter: &dyn SolverAdapter,
    roster: &Roster,
    compiled: &CompiledModel,
    settings: &SolveSettings,
    stop: &StopSignal,
) -> SquadOutcome {
    solve_with(adapter, roster, compiled, settings, stop, None)
}

pub(crate) fn compile_failure(err: &SbcError) -> SquadOutcome {
    SquadOutcome::failed(err, Duration::ZERO)
}

fn solve_with(
    adapter: &dyn SolverAdapter,
    roster: &Roster,
    compiled: &CompiledModel,
    settings: &SolveSettings,
    stop: &StopSignal,
    sender: Option<&mpsc::UnboundedSender<Assignment>>,
) -> SquadOutcome {
    let started = Instant::now();
    let time_limit = settings
        .time_limit()
        .unwrap_or(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS));
    let stats = compiled.model.stats();

    info!(
        event = "solve_start",
        backend = adapter.name(),
        candidates = compiled.variables.candidate_count(),
        constraints = stats.constraints(),
        time_limit_secs = time_limit.as_secs(),
    );

    // Per-run signal; the caller's signal only feeds into it.
    let signal = StopSignal::new();
    let scope = Arc::new(SolveScope::new(
        compiled.model.objective().map(|o| o.sense),
    ));
    let limits = OrTermination::from_limits(Some(time_limit), settings.unimproved_time_limit())
        .with(ExternalTermination::new(stop.clone()));
    let watchdog = StagnationWatchdog::spawn(Arc::clone(&scope), limits, signal.clone());

    let listener = RunListener {
        scope: &scope,
        roster,
        compiled,
        sender,
        best: Mutex::new(None),
    };
    let params = SolveParams {
        time_limit: Some(time_limit),
        log_progress: settings.log_progress,
    };
    let response = adapter.solve(&compiled.model, &params, &signal, &listener);
    let stopped = watchdog.finish();

    let (status, values) = match (response.status, listener.take_best()) {
        (SolveStatus::Unknown, Some(best)) => (SolveStatus::Feasible, best),
        (status, _) => (status, response.values),
    };
    let assignment = extract(roster, compiled, status, &values);

    info!(
        event = "solve_end",
        status = %status,
        objective = ?response.objective,
        total_chemistry = assignment.as_ref().map(|a| a.total_chemistry),
        total_cost = assignment.as_ref().map(|a| a.total_cost),
        stopped,
        cancelled = stop.is_raised(),
        wall_ms = started.elapsed().as_millis() as u64,
    );

    SquadOutcome {
        status,
        assignment,
        missing_fixed: compiled.report.missing_fixed.clone(),
        missing_removed: compiled.report.missing_removed.clone(),
        error: None,
        wall_time: started.elapsed(),
    }
}

/// Tracks improving incumbents and streams them as assignments.
struct RunListener<'a> {
    scope: &'a SolveScope,
    roster: &'a Roster,
    compiled: &'a CompiledModel,
    sender: Option<&'a mpsc::UnboundedSender<Assignment>>,
    best: Mutex<Option<Vec<i64>>>,
}

impl RunListener<'_> {
    fn take_best(&self) -> Option<Vec<i64>> {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl IncumbentListener for RunListener<'_> {
    fn on_incumbent(&self, objective: Option<i64>, values: &[i64]) {
        if !self.scope.record_incumbent(objective) {
            return;
        }
        *self.best.lock().unwrap_or_else(PoisonError::into_inner) = Some(values.to_vec());

        let Some(sender) = self.sender else {
            return;
        };
        let assignment = extract(self.roster, self.compiled, SolveStatus::Feasible, values);
        if let Some(assignment) = assignment {
            let _ = sender.send(assignment);
        }
    }
}
