//! Roster plus rules to model.

use sbcforge_config::{RuleConfig, RuleKind};
use sbcforge_core::{Formation, Result, Roster, RosterIndex};
use tracing::{debug, info};

use crate::chemistry::compile::compile_definitions;
use crate::model::Model;
use crate::objective::{build_objective, objective_mode};
use crate::rules::{compile_rule, position_follows_selection, RuleContext};
use crate::variables::Variables;

/// Non-fatal findings of one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Fixed identities absent from the roster.
    pub missing_fixed: Vec<String>,
    /// Removed identities absent from the roster.
    pub missing_removed: Vec<String>,
    /// Include-rule values absent from the roster, as `kind:value`.
    pub unknown_values: Vec<String>,
    /// Constraints added per compiled rule, in compilation order.
    pub rule_constraints: Vec<(RuleKind, usize)>,
}

/// A compiled model with the handles needed to read a solution back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledModel {
    pub model: Model,
    pub variables: Variables,
    pub index: RosterIndex,
    pub formation: Formation,
    pub squad_size: usize,
    pub report: CompileReport,
}

/// Compiles `roster` under `rules` into a solver-agnostic model.
///
/// Rules are compiled in [`RuleKind::ALL`] order, skipping the ones left out
/// of `rules.enabled_rules`. Chemistry variables are always defined; the
/// chemistry rule only adds the squad and per-player minimums.
///
/// # Errors
///
/// Returns [`SbcError::ModelInvalid`](sbcforge_core::SbcError::ModelInvalid)
/// when more than one objective is requested, and a configuration error when
/// the rules fail validation.
///
/// # Example
///
/// ```
/// use sbcforge_config::RuleConfig;
/// use sbcforge_core::{Candidate, Roster};
/// use sbcforge_model::compile;
///
/// let roster: Roster = ["GK", "CB", "ST"]
///     .iter()
///     .enumerate()
///     .map(|(i, role)| Candidate::new(format!("P{i}"), "Club", "League", "Nation", *role, 75, 100))
///     .collect();
/// let rules = RuleConfig::new().with_custom_formation(["GK", "CB", "ST"]).with_squad_size(3);
///
/// let compiled = compile(&roster, &rules).unwrap();
/// assert_eq!(compiled.variables.candidate_count(), 3);
/// assert!(compiled.model.objective().is_some());
/// ```
pub fn compile(roster: &Roster, rules: &RuleConfig) -> Result<CompiledModel> {
    let mode = objective_mode(rules)?;
    rules.validate()?;
    let formation = rules.resolve_formation()?;

    info!(
        event = "compile_start",
        candidates = roster.len(),
        formation = formation.name(),
        squad_size = rules.squad_size,
    );

    let index = RosterIndex::build(roster);
    let mut model = Model::new();
    let variables = Variables::allocate(&mut model, &index);
    let mut report = CompileReport::default();

    let ctx = RuleContext {
        roster,
        index: &index,
        vars: &variables,
        rules,
        formation: &formation,
    };

    compile_definitions(&ctx, &mut model);
    if !rules.enabled_rules.is_enabled(RuleKind::Formation) {
        position_follows_selection(&ctx, &mut model);
    }

    for kind in RuleKind::ALL {
        if !rules.enabled_rules.is_enabled(kind) {
            continue;
        }
        let before = model.constraints().len();
        compile_rule(kind, &ctx, &mut model, &mut report);
        let added = model.constraints().len() - before;
        debug!(rule = ?kind, constraints = added, "rule compiled");
        report.rule_constraints.push((kind, added));
    }

    if let Some(mode) = mode {
        build_objective(&ctx, &mut model, mode);
    }

    model.validate()?;
    let stats = model.stats();
    info!(
        event = "compile_end",
        bool_vars = stats.bool_vars,
        int_vars = stats.int_vars,
        constraints = stats.constraints(),
        missing_fixed = report.missing_fixed.len(),
        missing_removed = report.missing_removed.len(),
    );

    Ok(CompiledModel {
        model,
        variables,
        index,
        formation,
        squad_size: rules.squad_size,
        report,
    })
}
