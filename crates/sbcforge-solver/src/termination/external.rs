//! External termination via a shared flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{SolveScope, Termination};

/// Cloneable stop flag shared between the caller, the watchdog and the
/// backend.
///
/// # Example
///
/// ```
/// use sbcforge_solver::termination::StopSignal;
///
/// let signal = StopSignal::new();
/// let handle = signal.clone();
///
/// handle.raise();
/// assert!(signal.is_raised());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Terminates when a [`StopSignal`] is raised.
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    signal: StopSignal,
}

impl ExternalTermination {
    pub fn new(signal: StopSignal) -> Self {
        Self { signal }
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _scope: &SolveScope) -> bool {
        self.signal.is_raised()
    }
}
