//! Objective builder and cost ceiling.

use sbcforge_config::{ObjectiveMode, RuleConfig};
use sbcforge_core::{Result, SbcError};

use crate::model::{LinearExpr, Model, Sense};
use crate::rules::RuleContext;

/// Returns the single requested objective mode, `None` for a feasibility
/// model.
///
/// # Errors
///
/// Returns [`SbcError::ModelInvalid`] when more than one mode is requested.
pub fn objective_mode(rules: &RuleConfig) -> Result<Option<ObjectiveMode>> {
    match rules.objectives.as_slice() {
        [] => Ok(None),
        [mode] => Ok(Some(*mode)),
        modes => Err(SbcError::ModelInvalid(format!(
            "at most one objective may be requested, got {modes:?}"
        ))),
    }
}

fn total_cost(ctx: &RuleContext<'_>) -> LinearExpr {
    LinearExpr::weighted(
        ctx.roster
            .iter()
            .enumerate()
            .map(|(i, c)| (ctx.select(i), c.cost)),
    )
}

/// Sets the model objective for `mode`.
pub(crate) fn build_objective(ctx: &RuleContext<'_>, model: &mut Model, mode: ObjectiveMode) {
    match mode {
        ObjectiveMode::MinimizeTotal => model.set_objective(Sense::Minimize, total_cost(ctx)),
        ObjectiveMode::MaximizeTotal => model.set_objective(Sense::Maximize, total_cost(ctx)),
        ObjectiveMode::MinimizeMax => {
            let costs = ctx.roster.iter().map(|c| c.cost);
            let lb = costs.clone().min().unwrap_or(0).min(0);
            let ub = costs.max().unwrap_or(0).max(0);
            let highest = model.new_int("max_cost", lb, ub);

            let mut exprs: Vec<LinearExpr> = ctx
                .roster
                .iter()
                .enumerate()
                .map(|(i, c)| LinearExpr::term(ctx.select(i), c.cost))
                .collect();
            if exprs.is_empty() {
                exprs.push(LinearExpr::constant(0));
            }
            model.add_max_equality(highest, exprs);
            model.set_objective(Sense::Minimize, LinearExpr::var(highest));
        }
    }
}

/// Total squad cost stays under the configured ceiling.
pub(crate) fn cost_ceiling(ctx: &RuleContext<'_>, model: &mut Model) {
    if let Some(cap) = ctx.rules.max_cost {
        model.add_le(total_cost(ctx), cap);
    }
}
