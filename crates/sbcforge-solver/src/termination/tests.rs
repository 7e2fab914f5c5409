use std::thread;
use std::time::Duration;

use sbcforge_model::Sense;

use super::*;

#[test]
fn test_time_termination() {
    let scope = SolveScope::new(None);

    assert!(!TimeTermination::seconds(60).is_terminated(&scope));
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));

    thread::sleep(Duration::from_millis(20));
    assert!(TimeTermination::millis(10).is_terminated(&scope));
}

#[test]
fn test_first_incumbent_always_improves() {
    let scope = SolveScope::new(Some(Sense::Minimize));

    assert!(scope.record_incumbent(Some(500)));
    assert_eq!(scope.best_objective(), Some(500));
    assert_eq!(scope.incumbent_count(), 1);
}

#[test]
fn test_improvement_follows_sense() {
    let min = SolveScope::new(Some(Sense::Minimize));
    min.record_incumbent(Some(500));
    assert!(!min.record_incumbent(Some(600)));
    assert!(!min.record_incumbent(Some(500)));
    assert!(min.record_incumbent(Some(400)));
    assert_eq!(min.best_objective(), Some(400));

    let max = SolveScope::new(Some(Sense::Maximize));
    max.record_incumbent(Some(500));
    assert!(max.record_incumbent(Some(600)));
    assert_eq!(max.best_objective(), Some(600));
}

#[test]
fn test_feasibility_scope_improves_once() {
    let scope = SolveScope::new(None);

    assert!(scope.record_incumbent(None));
    assert!(!scope.record_incumbent(None));
    assert_eq!(scope.incumbent_count(), 2);
    assert_eq!(scope.best_objective(), None);
}

#[test]
fn test_unimproved_window_restarts_on_improvement() {
    let scope = SolveScope::new(Some(Sense::Minimize));
    let term = UnimprovedTimeTermination::millis(40);

    thread::sleep(Duration::from_millis(50));
    assert!(term.is_terminated(&scope));

    scope.record_incumbent(Some(10));
    assert!(!term.is_terminated(&scope));

    // a worse incumbent does not restart the window
    thread::sleep(Duration::from_millis(50));
    scope.record_incumbent(Some(20));
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = SolveScope::new(None);
    let signal = StopSignal::new();
    let term = ExternalTermination::new(signal.clone());

    assert!(!term.is_terminated(&scope));
    signal.raise();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let scope = SolveScope::new(None);

    assert!(OrTermination::from_limits(None, None).is_empty());
    assert!(!OrTermination::from_limits(None, None).is_terminated(&scope));

    let limits = OrTermination::from_limits(Some(Duration::from_secs(60)), Some(Duration::ZERO));
    assert_eq!(limits.len(), 2);
    assert!(limits.is_terminated(&scope));

    let signal = StopSignal::new();
    let external = OrTermination::new()
        .with(TimeTermination::seconds(60))
        .with(ExternalTermination::new(signal.clone()));
    assert!(!external.is_terminated(&scope));
    signal.raise();
    assert!(external.is_terminated(&scope));
}
