//! Composite termination.

use std::time::Duration;

use super::{SolveScope, Termination, TimeTermination, UnimprovedTimeTermination};

/// Terminates when ANY child terminates.
///
/// # Example
///
/// ```
/// use sbcforge_solver::termination::{OrTermination, TimeTermination, UnimprovedTimeTermination};
///
/// let termination = OrTermination::new()
///     .with(TimeTermination::seconds(30))
///     .with(UnimprovedTimeTermination::seconds(10));
/// assert_eq!(termination.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct OrTermination(Vec<Box<dyn Termination>>);

impl OrTermination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Termination + 'static>(mut self, termination: T) -> Self {
        self.0.push(Box::new(termination));
        self
    }

    /// Builds the limits of a solve; `None` leaves a limit out.
    pub fn from_limits(time: Option<Duration>, unimproved: Option<Duration>) -> Self {
        let mut termination = Self::new();
        if let Some(limit) = time {
            termination = termination.with(TimeTermination::new(limit));
        }
        if let Some(limit) = unimproved {
            termination = termination.with(UnimprovedTimeTermination::new(limit));
        }
        termination
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Termination for OrTermination {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        self.0.iter().any(|t| t.is_terminated(scope))
    }
}
