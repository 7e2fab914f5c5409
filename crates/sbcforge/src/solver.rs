//! Solver entry points that hide the compile/solve wiring.

use std::path::Path;
use std::thread::{self, JoinHandle};

use sbcforge_config::{RuleConfig, SbcConfig, SolveSettings};
use sbcforge_core::{Result, Roster, SbcError};
use sbcforge_solver::{
    run_solver, run_solver_with_channel, Assignment, MicrolpAdapter, SquadOutcome, StopSignal,
};
use tokio::sync::mpsc;

/// Configuration file read by [`solve`].
pub const CONFIG_FILE: &str = "sbcforge.toml";

/// Solves `roster` with the rules and settings of [`CONFIG_FILE`].
///
/// A missing or unreadable file falls back to the default configuration.
pub fn solve(roster: &Roster) -> SquadOutcome {
    solve_with_config(roster, CONFIG_FILE)
}

/// Solves `roster` with the configuration stored at `path`.
pub fn solve_with_config(roster: &Roster, path: impl AsRef<Path>) -> SquadOutcome {
    #[cfg(feature = "console")]
    crate::console::init();

    let config = SbcConfig::load(path).unwrap_or_default();
    run_solver(roster, &config.rules, &config.solver)
}

/// A solve running on its own thread.
///
/// # Example
///
/// ```
/// use sbcforge::prelude::*;
/// use sbcforge::SolveJob;
///
/// let roster: Roster = [("Keeper", "GK"), ("Back", "CB")]
///     .iter()
///     .map(|(name, role)| Candidate::new(*name, "Club", "League", "Nation", *role, 75, 100))
///     .collect();
/// let rules = RuleConfig::new().with_custom_formation(["GK", "CB"]).with_squad_size(2);
///
/// let mut job = SolveJob::spawn(roster, rules, SolveSettings::default()).unwrap();
/// let outcome = job.join().unwrap();
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// assert_eq!(job.try_next().map(|a| a.total_cost), Some(200));
/// ```
#[derive(Debug)]
pub struct SolveJob {
    stop: StopSignal,
    receiver: mpsc::UnboundedReceiver<Assignment>,
    handle: Option<JoinHandle<SquadOutcome>>,
}

impl SolveJob {
    /// Starts solving in the background.
    ///
    /// # Errors
    ///
    /// Returns [`SbcError::Internal`] if the solver thread cannot be spawned.
    pub fn spawn(roster: Roster, rules: RuleConfig, settings: SolveSettings) -> Result<Self> {
        let stop = StopSignal::new();
        let (sender, receiver) = mpsc::unbounded_channel();

        let signal = stop.clone();
        let handle = thread::Builder::new()
            .name("sbcforge-solve".to_string())
            .spawn(move || {
                run_solver_with_channel(
                    &MicrolpAdapter::new(),
                    &roster,
                    &rules,
                    &settings,
                    &signal,
                    sender,
                )
            })
            .map_err(|err| SbcError::Internal(format!("failed to spawn solver: {err}")))?;

        Ok(Self {
            stop,
            receiver,
            handle: Some(handle),
        })
    }

    /// Requests early termination.
    pub fn terminate_early(&self) {
        self.stop.raise();
    }

    /// Next streamed incumbent, if one is waiting.
    pub fn try_next(&mut self) -> Option<Assignment> {
        self.receiver.try_recv().ok()
    }

    /// Receiver of every improving incumbent.
    pub fn incumbents(&mut self) -> &mut mpsc::UnboundedReceiver<Assignment> {
        &mut self.receiver
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the final outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SbcError::Cancelled`] if the outcome was already taken and
    /// [`SbcError::Internal`] if the solver thread panicked.
    pub fn join(&mut self) -> Result<SquadOutcome> {
        let handle = self.handle.take().ok_or(SbcError::Cancelled)?;
        handle
            .join()
            .map_err(|_| SbcError::Internal("solver thread panicked".to_string()))
    }
}
