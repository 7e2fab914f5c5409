//! Stagnation watchdog.
//!
//! A polling thread that raises a [`StopSignal`] once the solve runs past
//! its time limit or goes too long without an improving incumbent. It works
//! with any backend that reports incumbents through [`IncumbentListener`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::IncumbentListener;
use crate::termination::{SolveScope, StopSignal, Termination};

const DEFAULT_POLL: Duration = Duration::from_millis(10);

/// Raises a stop signal when a termination condition fires.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use sbcforge_solver::termination::{OrTermination, SolveScope, StopSignal};
/// use sbcforge_solver::StagnationWatchdog;
///
/// let signal = StopSignal::new();
/// let scope = Arc::new(SolveScope::new(None));
/// let limits = OrTermination::from_limits(Some(Duration::from_millis(20)), None);
/// let watchdog = StagnationWatchdog::spawn(scope, limits, signal.clone());
///
/// std::thread::sleep(Duration::from_millis(200));
/// assert!(signal.is_raised());
/// assert!(watchdog.finish());
/// ```
#[derive(Debug)]
pub struct StagnationWatchdog {
    scope: Arc<SolveScope>,
    signal: StopSignal,
    finished: Arc<AtomicBool>,
    fired: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StagnationWatchdog {
    pub fn spawn<T: Termination + 'static>(
        scope: Arc<SolveScope>,
        termination: T,
        signal: StopSignal,
    ) -> Self {
        Self::with_poll(scope, termination, signal, DEFAULT_POLL)
    }

    /// Spawns the watchdog checking `termination` every `poll`.
    pub fn with_poll<T: Termination + 'static>(
        scope: Arc<SolveScope>,
        termination: T,
        signal: StopSignal,
        poll: Duration,
    ) -> Self {
        let finished = Arc::new(AtomicBool::new(false));
        let fired = Arc::new(AtomicBool::new(false));

        let spawned = {
            let scope = Arc::clone(&scope);
            let signal = signal.clone();
            let finished = Arc::clone(&finished);
            let fired = Arc::clone(&fired);
            thread::Builder::new()
                .name("sbcforge-watchdog".to_string())
                .spawn(move || loop {
                    if finished.load(Ordering::SeqCst) || signal.is_raised() {
                        return;
                    }
                    if termination.is_terminated(&scope) {
                        info!(
                            event = "watchdog_stop",
                            elapsed_ms = scope.elapsed().as_millis() as u64,
                            unimproved_ms = scope.since_improvement().as_millis() as u64,
                            incumbents = scope.incumbent_count(),
                        );
                        fired.store(true, Ordering::SeqCst);
                        signal.raise();
                        return;
                    }
                    thread::park_timeout(poll);
                })
        };
        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(event = "watchdog_spawn_failed", error = %err);
                None
            }
        };

        Self {
            scope,
            signal,
            finished,
            fired,
            handle,
        }
    }

    pub fn scope(&self) -> &SolveScope {
        &self.scope
    }

    pub fn signal(&self) -> &StopSignal {
        &self.signal
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Stops the watchdog and returns whether it raised the signal.
    pub fn finish(mut self) -> bool {
        self.shutdown();
        self.has_fired()
    }

    fn shutdown(&mut self) {
        self.finished.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl IncumbentListener for StagnationWatchdog {
    fn on_incumbent(&self, objective: Option<i64>, _values: &[i64]) {
        self.scope.record_incumbent(objective);
    }
}

impl Drop for StagnationWatchdog {
    fn drop(&mut self) {
        self.shutdown();
    }
}
