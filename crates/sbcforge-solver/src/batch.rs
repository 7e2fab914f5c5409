//! Parallel compilation and solving of several rule sets.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use sbcforge_config::{RuleConfig, SolveSettings};
use sbcforge_core::{Result, Roster};
use sbcforge_model::{compile, CompiledModel};
use tracing::{info, warn};

use crate::adapter::SolverAdapter;
use crate::backend::MicrolpAdapter;
use crate::basic::{compile_failure, solve_compiled, SquadOutcome};
use crate::termination::StopSignal;

/// Compiles every rule set against `roster` in parallel.
///
/// Results keep the order of `rule_sets`.
pub fn compile_batch(roster: &Roster, rule_sets: &[RuleConfig]) -> Vec<Result<CompiledModel>> {
    rule_sets
        .par_iter()
        .map(|rules| compile(roster, rules))
        .collect()
}

/// Solves compiled models on a pool of `settings.workers` threads.
///
/// Raising `stop` ends every solve of the batch.
pub fn solve_batch(
    adapter: &dyn SolverAdapter,
    roster: &Roster,
    models: &[CompiledModel],
    settings: &SolveSettings,
    stop: &StopSignal,
) -> Vec<SquadOutcome> {
    let workers = settings.workers.max(1);
    info!(event = "batch_start", models = models.len(), workers);

    let solve = || {
        models
            .par_iter()
            .map(|compiled| solve_compiled(adapter, roster, compiled, settings, stop))
            .collect()
    };
    match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(solve),
        Err(err) => {
            warn!(event = "batch_pool_failed", error = %err);
            models
                .iter()
                .map(|compiled| solve_compiled(adapter, roster, compiled, settings, stop))
                .collect()
        }
    }
}

/// Compiles and solves every rule set with the microlp backend.
///
/// Rule sets that fail to compile yield a `ModelInvalid` outcome in place.
pub fn run_batch(
    roster: &Roster,
    rule_sets: &[RuleConfig],
    settings: &SolveSettings,
) -> Vec<SquadOutcome> {
    let mut models = Vec::with_capacity(rule_sets.len());
    let mut slots = Vec::with_capacity(rule_sets.len());
    for result in compile_batch(roster, rule_sets) {
        match result {
            Ok(compiled) => {
                models.push(compiled);
                slots.push(None);
            }
            Err(err) => slots.push(Some(compile_failure(&err))),
        }
    }

    // one outcome per compiled model, in order
    let mut solved = solve_batch(
        &MicrolpAdapter::new(),
        roster,
        &models,
        settings,
        &StopSignal::new(),
    )
    .into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| solved.next()))
        .collect()
}
