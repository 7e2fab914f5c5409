//! Termination based on lack of improvement.

use std::time::Duration;

use super::{SolveScope, Termination};

/// Terminates if no improving incumbent arrives within a time window.
///
/// The window restarts on every improvement. Before the first incumbent it
/// runs from the start of the solve.
///
/// # Example
///
/// ```
/// use sbcforge_solver::termination::UnimprovedTimeTermination;
///
/// let term = UnimprovedTimeTermination::seconds(15);
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for UnimprovedTimeTermination {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        scope.since_improvement() >= self.limit
    }
}
