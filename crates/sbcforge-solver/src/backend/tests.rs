use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use sbcforge_config::{FormationMode, RuleConfig, SquadRatingFormula};
use sbcforge_model::{compile, LinearExpr, Model, Sense};
use sbcforge_test::{worked_scenario, WORKED_SCENARIO_FORMATION};

use super::microlp::{build_problem, Progress, Worker};
use super::*;
use crate::adapter::{IncumbentListener, NoopListener, SolveParams, SolverAdapter};
use crate::status::SolveStatus;
use crate::termination::StopSignal;

/// Every assignment of `domains`, first column varying slowest.
fn assignments(domains: &[(i64, i64)]) -> Vec<Vec<i64>> {
    domains.iter().fold(vec![Vec::new()], |acc, &(lb, ub)| {
        acc.into_iter()
            .flat_map(|prefix| {
                (lb..=ub).map(move |value| {
                    let mut next = prefix.clone();
                    next.push(value);
                    next
                })
            })
            .collect()
    })
}

/// Asserts that the program accepts exactly the model's solutions once
/// auxiliary columns are projected out.
fn assert_equivalent(model: &Model) {
    let program = LinearProgram::from_model(model);
    let model_domains: Vec<(i64, i64)> = model.vars().iter().map(|d| (d.lb, d.ub)).collect();
    let aux_domains: Vec<(i64, i64)> = program.columns()[program.model_vars()..]
        .iter()
        .map(|c| (c.lb, c.ub))
        .collect();
    let aux = assignments(&aux_domains);

    for values in assignments(&model_domains) {
        let expected = model.is_satisfied_by(&values);
        let actual = aux.iter().any(|extra| {
            let mut full = values.clone();
            full.extend_from_slice(extra);
            program.is_satisfied_by(&full)
        });
        assert_eq!(actual, expected, "assignment {values:?}");
    }
}

#[test]
fn test_plain_linear_rows() {
    let mut model = Model::new();
    let x = model.new_int("x", 0, 5);
    let y = model.new_int("y", -2, 2);
    model.add_range(LinearExpr::weighted([(x, 1), (y, 2)]), 1, 4);
    model.add_le(LinearExpr::sum([x, y]), 10);

    let program = LinearProgram::from_model(&model);
    // x + y <= 10 always holds over the domains
    assert_eq!(program.rows().len(), 2);
    assert_equivalent(&model);
}

#[test]
fn test_reified_range() {
    let mut model = Model::new();
    let b = model.new_bool("b");
    let x = model.new_int("x", 0, 4);
    model.add_range_if(LinearExpr::var(x), 2, 3, &[b.is_true()]);
    model.add_eq_if(LinearExpr::var(x), 0, &[b.is_false()]);

    assert_equivalent(&model);
}

#[test]
fn test_reified_on_several_literals() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    let x = model.new_int("x", -1, 3);
    let mut expr = LinearExpr::var(x);
    expr.add_constant(1);
    model.add_ge_if(expr, 3, &[a.is_true(), b.is_false()]);
    model.add_le_if(LinearExpr::sum([x, a]), 1, &[b.is_true()]);

    assert_equivalent(&model);
}

#[test]
fn test_exactly_one() {
    let mut model = Model::new();
    let vars: Vec<_> = (0..3).map(|i| model.new_bool(format!("b{i}"))).collect();
    model.add_exactly_one(vars);

    assert_equivalent(&model);
}

#[test]
fn test_product() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let x = model.new_int("x", 0, 3);
    let y = model.new_int("y", 0, 3);
    model.add_product(y, a, x);

    assert_equivalent(&model);

    let mut signed = Model::new();
    let a = signed.new_bool("a");
    let x = signed.new_int("x", -2, 2);
    let y = signed.new_int("y", -2, 2);
    signed.add_product(y, a, x);

    assert_equivalent(&signed);
}

#[test]
fn test_max_equality() {
    let mut model = Model::new();
    let x = model.new_int("x", 0, 3);
    let y = model.new_int("y", 0, 2);
    let t = model.new_int("t", -1, 4);
    let mut shifted = LinearExpr::term(y, 2);
    shifted.add_constant(-2);
    model.add_max_equality(t, vec![LinearExpr::var(x), shifted, LinearExpr::constant(0)]);

    assert_equivalent(&model);

    let mut single = Model::new();
    let x = single.new_int("x", 0, 3);
    let t = single.new_int("t", 0, 3);
    single.add_max_equality(t, vec![LinearExpr::var(x)]);

    assert_equivalent(&single);
    assert_eq!(LinearProgram::from_model(&single).columns().len(), 2);
}

#[test]
fn test_constant_constraints() {
    let mut model = Model::new();
    model.new_bool("b");
    model.add_le(LinearExpr::constant(3), 2);

    assert!(LinearProgram::from_model(&model).is_trivially_infeasible());

    let mut fine = Model::new();
    fine.new_bool("b");
    fine.add_range(LinearExpr::constant(2), 0, 2);
    assert!(!LinearProgram::from_model(&fine).is_trivially_infeasible());
}

#[test]
fn test_objective_is_carried() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    model.set_objective(Sense::Maximize, LinearExpr::term(a, 7));

    let program = LinearProgram::from_model(&model);
    let (sense, terms) = program.objective().unwrap();
    assert_eq!(sense, Sense::Maximize);
    assert_eq!(terms, &[(0, 7)]);
}

fn solve(model: &Model) -> crate::adapter::SolveResponse {
    MicrolpAdapter::new().solve(model, &SolveParams::default(), &StopSignal::new(), &NoopListener)
}

#[test]
fn test_microlp_finds_optimum_through_reification() {
    let mut model = Model::new();
    let picks: Vec<_> = (0..4).map(|i| model.new_bool(format!("pick{i}"))).collect();
    let bonus = model.new_bool("bonus");
    model.add_eq(LinearExpr::sum(picks.iter().copied()), 2);
    // bonus only when picks 0 and 1 are both taken
    model.add_ge_if(LinearExpr::sum([picks[0], picks[1]]), 2, &[bonus.is_true()]);
    model.add_eq(LinearExpr::var(bonus), 1);
    model.set_objective(
        Sense::Minimize,
        LinearExpr::weighted([(picks[0], 5), (picks[1], 4), (picks[2], 1), (picks[3], 2)]),
    );

    let response = solve(&model);
    assert_eq!(response.status, SolveStatus::Optimal);
    assert_eq!(response.values, vec![1, 1, 0, 0, 1]);
    assert_eq!(response.objective, Some(9));
}

#[test]
fn test_microlp_reports_infeasible() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    model.add_ge(LinearExpr::sum([a, b]), 2);
    model.add_le(LinearExpr::var(a), 0);

    let response = solve(&model);
    assert_eq!(response.status, SolveStatus::Infeasible);
    assert!(response.values.is_empty());
}

#[test]
fn test_raised_signal_skips_solve() {
    let mut model = Model::new();
    model.new_bool("a");
    let stop = StopSignal::new();
    stop.raise();

    let response =
        MicrolpAdapter::new().solve(&model, &SolveParams::default(), &stop, &NoopListener);
    assert_eq!(response.status, SolveStatus::Unknown);
}

#[test]
fn test_invalid_model_is_rejected() {
    let mut model = Model::new();
    model.new_int("x", 3, 1);

    assert_eq!(solve(&model).status, SolveStatus::ModelInvalid);
}

/// Flexible worked scenario; microlp needs far longer than these tests
/// allow to prove its optimum.
fn slow_model() -> Model {
    let rules = RuleConfig::new()
        .with_formation(WORKED_SCENARIO_FORMATION)
        .with_formation_mode(FormationMode::Flexible)
        .with_squad_rating(80, SquadRatingFormula::Weighted)
        .with_chemistry_min(20);
    compile(&worked_scenario(), &rules).unwrap().model
}

#[derive(Default)]
struct Recorder {
    objectives: Mutex<Vec<Option<i64>>>,
}

impl IncumbentListener for Recorder {
    fn on_incumbent(&self, objective: Option<i64>, _values: &[i64]) {
        self.objectives.lock().unwrap().push(objective);
    }
}

#[test]
fn test_cancelled_worker_exits() {
    let program = LinearProgram::from_model(&slow_model());
    let worker = Worker::spawn(build_problem(&program)).unwrap();
    thread::sleep(Duration::from_millis(100));

    let started = Instant::now();
    assert!(worker.cancel());
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_worker_reports_optimum() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    model.add_ge(LinearExpr::sum([a, b]), 1);
    model.set_objective(Sense::Minimize, LinearExpr::weighted([(a, 3), (b, 2)]));

    let worker = Worker::spawn(build_problem(&LinearProgram::from_model(&model))).unwrap();
    let done = loop {
        match worker.recv_timeout(Duration::from_secs(30)).unwrap() {
            Progress::Incumbent(_) => continue,
            Progress::Done(done) => break done,
        }
    };
    assert_eq!(done.unwrap(), vec![0.0, 1.0]);
    assert!(worker.join());
}

#[test]
fn test_time_limit_ends_search() {
    let model = slow_model();
    let recorder = Recorder::default();
    let params = SolveParams {
        time_limit: Some(Duration::from_millis(500)),
        ..SolveParams::default()
    };

    let started = Instant::now();
    let response = MicrolpAdapter::new().solve(&model, &params, &StopSignal::new(), &recorder);
    assert!(started.elapsed() < Duration::from_secs(10));

    let objectives = recorder.objectives.into_inner().unwrap();
    match response.status {
        SolveStatus::Feasible => {
            assert!(model.is_satisfied_by(&response.values));
            assert_eq!(objectives.last(), Some(&response.objective));
        }
        SolveStatus::Unknown => {
            assert!(objectives.is_empty());
            assert!(response.values.is_empty());
        }
        other => panic!("unexpected status {other}"),
    }
}

#[test]
fn test_raised_signal_cancels_running_search() {
    let model = slow_model();
    let stop = StopSignal::new();
    let raiser = {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            stop.raise();
        })
    };

    let started = Instant::now();
    let response =
        MicrolpAdapter::new().solve(&model, &SolveParams::default(), &stop, &NoopListener);
    raiser.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(matches!(response.status, SolveStatus::Feasible | SolveStatus::Unknown));
}
