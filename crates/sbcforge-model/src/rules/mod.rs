//! Business rules compiled into the model.
//!
//! Every rule is a pure function of the roster, its index, the allocated
//! variables and the rule configuration; it only appends constraints (and
//! the auxiliary variables they need) to the model.

mod groups;
mod identity;
mod squad;
mod tiers;

#[cfg(test)]
mod tests;

use sbcforge_config::{RuleConfig, RuleKind};
use sbcforge_core::{Formation, Roster, RosterIndex};

pub(crate) use squad::position_follows_selection;

use crate::compiler::CompileReport;
use crate::model::{LinearExpr, Model, VarId};
use crate::variables::Variables;

/// Read-only inputs shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub roster: &'a Roster,
    pub index: &'a RosterIndex,
    pub vars: &'a Variables,
    pub rules: &'a RuleConfig,
    pub formation: &'a Formation,
}

impl RuleContext<'_> {
    /// Sum of the selection variables of `rows`.
    pub(crate) fn selected(&self, rows: &[usize]) -> LinearExpr {
        LinearExpr::sum(rows.iter().map(|&i| self.vars.select[i]))
    }

    pub(crate) fn select(&self, i: usize) -> VarId {
        self.vars.select[i]
    }

    pub(crate) fn squad_size(&self) -> i64 {
        self.rules.squad_size as i64
    }
}

/// Compiles one rule kind.
pub(crate) fn compile_rule(
    kind: RuleKind,
    ctx: &RuleContext<'_>,
    model: &mut Model,
    report: &mut CompileReport,
) {
    match kind {
        RuleKind::SquadSize => squad::squad_size(ctx, model),
        RuleKind::UniqueNames => squad::unique_names(ctx, model),
        RuleKind::Formation => squad::formation(ctx, model),
        RuleKind::GroupInclude => groups::include(ctx, model, report),
        RuleKind::GroupMax => groups::max_per_group(ctx, model),
        RuleKind::GroupMinPerGroup => groups::min_per_group(ctx, model),
        RuleKind::GroupUnique => groups::unique_count(ctx, model),
        RuleKind::TierMinimum => tiers::tier_minimums(ctx, model),
        RuleKind::RatingMinimum => tiers::rating_minimums(ctx, model),
        RuleKind::SquadRating => tiers::squad_rating(ctx, model),
        RuleKind::Chemistry => crate::chemistry::compile::compile_requirements(ctx, model),
        RuleKind::FixedCandidates => identity::fixed(ctx, model, report),
        RuleKind::RemovedCandidates => identity::removed(ctx, model, report),
        RuleKind::DuplicatePriority => identity::duplicate_priority(ctx, model),
        RuleKind::CostCeiling => crate::objective::cost_ceiling(ctx, model),
    }
}

/// Adds `indicator ⇔ expr >= threshold` for an expression bounded below by 0.
pub(crate) fn reify_at_least(
    model: &mut Model,
    indicator: VarId,
    expr: LinearExpr,
    threshold: i64,
) {
    model.add_ge_if(expr.clone(), threshold, &[indicator.is_true()]);
    model.add_le_if(expr, threshold - 1, &[indicator.is_false()]);
}
