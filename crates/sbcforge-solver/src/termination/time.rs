//! Time-based termination.

use std::time::Duration;

use super::{SolveScope, Termination};

/// Terminates after a time limit.
///
/// # Example
///
/// ```
/// use sbcforge_solver::termination::TimeTermination;
/// use std::time::Duration;
///
/// let term = TimeTermination::new(Duration::from_secs(30));
///
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        scope.elapsed() >= self.limit
    }
}
