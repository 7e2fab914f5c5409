//! Termination conditions for a running solve.
//!
//! Conditions are polled against a [`SolveScope`], which tracks elapsed
//! time and the incumbents reported by the backend.

mod composite;
mod external;
mod time;
mod unimproved;

use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use sbcforge_model::Sense;

pub use composite::OrTermination;
pub use external::{ExternalTermination, StopSignal};
pub use time::TimeTermination;
pub use unimproved::UnimprovedTimeTermination;

/// Trait for determining when to stop solving.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, scope: &SolveScope) -> bool;
}

#[derive(Debug, Default)]
struct Progress {
    best: Option<i64>,
    last_improvement: Option<Instant>,
    incumbents: u64,
}

/// Shared progress of one solve.
#[derive(Debug)]
pub struct SolveScope {
    sense: Option<Sense>,
    started: Instant,
    progress: Mutex<Progress>,
}

impl SolveScope {
    /// Starts the clock. `sense` is `None` for feasibility models.
    pub fn new(sense: Option<Sense>) -> Self {
        Self {
            sense,
            started: Instant::now(),
            progress: Mutex::new(Progress::default()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time since the last improving incumbent, or since the start.
    pub fn since_improvement(&self) -> Duration {
        self.progress()
            .last_improvement
            .unwrap_or(self.started)
            .elapsed()
    }

    pub fn best_objective(&self) -> Option<i64> {
        self.progress().best
    }

    pub fn incumbent_count(&self) -> u64 {
        self.progress().incumbents
    }

    /// Records an incumbent and returns whether it improved on the best.
    ///
    /// The first incumbent always improves. Later ones improve only when
    /// they beat the best objective in the scope's sense.
    pub fn record_incumbent(&self, objective: Option<i64>) -> bool {
        let mut progress = self.progress();
        progress.incumbents += 1;

        let improved = match (progress.incumbents, self.sense, objective, progress.best) {
            (1, _, _, _) => true,
            (_, Some(sense), Some(candidate), Some(best)) => sense.improves(candidate, best),
            (_, Some(_), Some(_), None) => true,
            _ => false,
        };
        if improved {
            if objective.is_some() {
                progress.best = objective;
            }
            progress.last_improvement = Some(Instant::now());
        }
        improved
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests;
