//! `good_lp` backend running the pure-Rust microlp solver.
//!
//! The problem is built through `good_lp` and searched in short microlp
//! slices on a worker thread. Between slices the worker reports new
//! incumbents and checks its cancel flag, so a stop ends the search within
//! one slice and the thread is joined before `solve` returns.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ::microlp::{Problem, ResumeOptions, SolveOptions, SolveOutcome};
use good_lp::solvers::microlp::microlp as microlp_solver;
use good_lp::{variable, Expression, ProblemVariables, SolverModel, Variable};
use sbcforge_model::{Model, Sense};
use tracing::{debug, info, warn};

use super::linearize::{Cmp, LinearProgram};
use crate::adapter::{IncumbentListener, SolveParams, SolveResponse, SolverAdapter};
use crate::status::SolveStatus;
use crate::termination::StopSignal;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Search time between two cancel checks of the worker.
const SLICE: Duration = Duration::from_millis(50);

/// Solves models with `good_lp` and microlp after big-M linearization.
///
/// Every feasible assignment microlp finds is verified against the model and
/// reported to the listener. When the stop signal or time limit fires first,
/// the worker is cancelled and joined; the response is `Feasible` with the
/// best verified incumbent, or `Unknown` without one.
///
/// # Example
///
/// ```
/// use sbcforge_model::{LinearExpr, Model, Sense};
/// use sbcforge_solver::{MicrolpAdapter, NoopListener, SolveParams, SolveStatus, SolverAdapter};
/// use sbcforge_solver::termination::StopSignal;
///
/// let mut model = Model::new();
/// let a = model.new_bool("a");
/// let b = model.new_bool("b");
/// model.add_ge(LinearExpr::sum([a, b]), 1);
/// model.set_objective(Sense::Minimize, LinearExpr::weighted([(a, 3), (b, 2)]));
///
/// let response = MicrolpAdapter::new().solve(
///     &model,
///     &SolveParams::default(),
///     &StopSignal::new(),
///     &NoopListener,
/// );
/// assert_eq!(response.status, SolveStatus::Optimal);
/// assert_eq!(response.values, vec![0, 1]);
/// assert_eq!(response.objective, Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpAdapter;

impl MicrolpAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SolverAdapter for MicrolpAdapter {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(
        &self,
        model: &Model,
        params: &SolveParams,
        stop: &StopSignal,
        listener: &dyn IncumbentListener,
    ) -> SolveResponse {
        let started = Instant::now();
        let respond = |status| SolveResponse::without_solution(status, started.elapsed());

        if let Err(err) = model.validate() {
            warn!(event = "model_invalid", error = %err);
            return respond(SolveStatus::ModelInvalid);
        }

        let program = LinearProgram::from_model(model);
        if program.is_trivially_infeasible() {
            return respond(SolveStatus::Infeasible);
        }
        if !fits_microlp(&program) {
            warn!(event = "model_invalid", error = "integer bounds outside the i32 range");
            return respond(SolveStatus::ModelInvalid);
        }
        if stop.is_raised() {
            return respond(SolveStatus::Unknown);
        }

        let columns = program.columns().len();
        let rows = program.rows().len();
        if params.log_progress {
            info!(event = "backend_start", backend = "microlp", columns, rows);
        } else {
            debug!(event = "backend_start", backend = "microlp", columns, rows);
        }

        let worker = match Worker::spawn(build_problem(&program)) {
            Ok(worker) => worker,
            Err(err) => {
                warn!(event = "backend_spawn_failed", error = %err);
                return respond(SolveStatus::Unknown);
            }
        };

        let deadline = params.time_limit.map(|limit| started + limit);
        let mut best: Option<(Vec<i64>, Option<i64>)> = None;
        let interrupted = |best: Option<(Vec<i64>, Option<i64>)>| match best {
            Some((values, objective)) => SolveResponse {
                status: SolveStatus::Feasible,
                values,
                objective,
                wall_time: started.elapsed(),
            },
            None => respond(SolveStatus::Unknown),
        };

        let finished = loop {
            match worker.recv_timeout(POLL_INTERVAL) {
                Ok(Progress::Incumbent(raw)) => {
                    if let Some(values) = verified(model, &raw) {
                        let objective = objective_of(model, &values);
                        debug!(event = "backend_incumbent", objective = ?objective);
                        listener.on_incumbent(objective, &values);
                        best = Some((values, objective));
                    }
                }
                Ok(Progress::Done(result)) => break result,
                Err(RecvTimeoutError::Timeout) => {
                    let expired = deadline.is_some_and(|d| Instant::now() >= d);
                    if stop.is_raised() || expired {
                        let joined = worker.cancel();
                        debug!(event = "backend_cancelled", expired, joined);
                        return interrupted(best);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!(event = "backend_lost", backend = "microlp");
                    worker.join();
                    return interrupted(best);
                }
            }
        };
        worker.join();

        match finished {
            Ok(raw) => {
                let Some(values) = verified(model, &raw) else {
                    return interrupted(best);
                };
                let objective = objective_of(model, &values);
                if best.as_ref().map(|(seen, _)| seen) != Some(&values) {
                    listener.on_incumbent(objective, &values);
                }
                SolveResponse {
                    status: SolveStatus::Optimal,
                    values,
                    objective,
                    wall_time: started.elapsed(),
                }
            }
            Err(::microlp::Error::Infeasible) => respond(SolveStatus::Infeasible),
            Err(err) => {
                warn!(event = "backend_failed", error = ?err);
                interrupted(best)
            }
        }
    }
}

/// Messages from the worker thread.
pub(super) enum Progress {
    /// A feasible assignment without an optimality proof.
    Incumbent(Vec<f64>),
    /// The search ended: a proven optimum or an error.
    Done(Result<Vec<f64>, ::microlp::Error>),
}

/// Thread running the sliced microlp search.
pub(super) struct Worker {
    cancel: StopSignal,
    receiver: Receiver<Progress>,
    handle: JoinHandle<()>,
}

impl Worker {
    pub(super) fn spawn(problem: Problem) -> io::Result<Self> {
        let cancel = StopSignal::new();
        let (sender, receiver) = mpsc::channel();
        let flag = cancel.clone();
        let handle = thread::Builder::new()
            .name("sbcforge-microlp".to_string())
            .spawn(move || {
                if let Some(done) = search(&problem, &flag, &sender) {
                    // The receiver only goes away after a cancel.
                    let _ = sender.send(Progress::Done(done));
                }
            })?;
        Ok(Self {
            cancel,
            receiver,
            handle,
        })
    }

    pub(super) fn recv_timeout(&self, timeout: Duration) -> Result<Progress, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Raises the cancel flag and waits for the thread to exit.
    ///
    /// Returns `false` when the thread panicked.
    pub(super) fn cancel(self) -> bool {
        self.cancel.raise();
        self.join()
    }

    pub(super) fn join(self) -> bool {
        self.handle.join().is_ok()
    }
}

/// Runs microlp slice by slice until optimality, an error or a cancel.
///
/// Returns `None` when cancelled or when nobody receives progress anymore.
fn search(
    problem: &Problem,
    cancel: &StopSignal,
    sender: &Sender<Progress>,
) -> Option<Result<Vec<f64>, ::microlp::Error>> {
    let mut options = SolveOptions::default();
    options.time_limit = Some(SLICE);
    let mut outcome = match problem.solve_with(options) {
        Ok(outcome) => outcome,
        Err(err) => return Some(Err(err)),
    };

    let mut reported: Option<Vec<f64>> = None;
    loop {
        if let Some(values) = solution_values(&outcome) {
            if outcome.is_optimal() {
                return Some(Ok(values));
            }
            if reported.as_ref() != Some(&values) {
                sender.send(Progress::Incumbent(values.clone())).ok()?;
                reported = Some(values);
            }
        }
        if cancel.is_raised() {
            return None;
        }

        let mut resume = ResumeOptions::default();
        resume.time_limit = Some(SLICE);
        outcome = match outcome.resume_with(resume) {
            Ok(outcome) => outcome,
            Err(err) => return Some(Err(err)),
        };
    }
}

fn solution_values(outcome: &SolveOutcome) -> Option<Vec<f64>> {
    outcome
        .solution()
        .map(|solution| solution.iter().map(|(_, value)| value).collect())
}

/// Rounds backend values and checks them against the model.
fn verified(model: &Model, raw: &[f64]) -> Option<Vec<i64>> {
    let values: Vec<i64> = raw
        .iter()
        .take(model.vars().len())
        .map(|value| value.round() as i64)
        .collect();
    match model.first_violation(&values) {
        Some(violation) => {
            warn!(event = "backend_violation", %violation);
            None
        }
        None => Some(values),
    }
}

fn objective_of(model: &Model, values: &[i64]) -> Option<i64> {
    model.objective().map(|o| o.expr.evaluate(values))
}

fn fits_microlp(program: &LinearProgram) -> bool {
    let range = i64::from(i32::MIN)..=i64::from(i32::MAX);
    program
        .columns()
        .iter()
        .all(|column| range.contains(&column.lb) && range.contains(&column.ub))
}

/// Builds the microlp problem through `good_lp`; column `i` becomes
/// microlp variable `i`.
pub(super) fn build_problem(program: &LinearProgram) -> Problem {
    let mut vars = ProblemVariables::new();
    let columns: Vec<Variable> = program
        .columns()
        .iter()
        .map(|column| {
            if column.binary {
                vars.add(variable().binary())
            } else {
                vars.add(variable().integer().min(column.lb as f64).max(column.ub as f64))
            }
        })
        .collect();

    let unsolved = match program.objective() {
        Some((Sense::Maximize, terms)) => vars.maximise(expression(&columns, terms)),
        Some((Sense::Minimize, terms)) => vars.minimise(expression(&columns, terms)),
        None => vars.minimise(Expression::default()),
    };
    let mut problem = unsolved.using(microlp_solver);
    for row in program.rows() {
        let lhs = expression(&columns, &row.terms);
        let rhs = row.rhs as f64;
        problem = problem.with(match row.cmp {
            Cmp::Le => lhs.leq(rhs),
            Cmp::Ge => lhs.geq(rhs),
            Cmp::Eq => lhs.eq(rhs),
        });
    }
    problem.as_inner().clone()
}

fn expression(columns: &[Variable], terms: &[(usize, i64)]) -> Expression {
    let mut expr = Expression::with_capacity(terms.len());
    for &(col, coef) in terms {
        expr.add_mul(coef as f64, columns[col]);
    }
    expr
}
