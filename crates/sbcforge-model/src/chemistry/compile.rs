//! Chemistry encoding into linear and reified constraints.

use sbcforge_core::GroupKind;

use super::{bucket_top, contributors, profiles, StepFunction};
use crate::model::{LinearExpr, Model};
use crate::rules::RuleContext;
use crate::variables::MAX_CHEMISTRY;

/// Defines on-pitch flags, group tiers and per-candidate chemistry.
///
/// These constraints only tie the chemistry variables to the selection;
/// they never restrict which squads are feasible.
pub(crate) fn compile_definitions(ctx: &RuleContext<'_>, model: &mut Model) {
    let vars = ctx.vars;
    let profiles = profiles(ctx.roster, &ctx.rules.chemistry);

    for i in 0..vars.candidate_count() {
        model.add_product(vars.on_pitch[i], vars.select[i], vars.position[i]);
    }

    for kind in GroupKind::ALL {
        for (g, list) in contributors(ctx.index, &profiles, kind).iter().enumerate() {
            let step = StepFunction::new(kind, bucket_top(list, ctx.rules.squad_size));
            let count =
                LinearExpr::weighted(list.iter().map(|&(i, w)| (vars.on_pitch[i], i64::from(w))));
            let tier = vars.tier(kind, g);
            let buckets = vars.buckets(kind, g);

            model.add_exactly_one(buckets.to_vec());
            for (k, &bucket) in buckets.iter().enumerate() {
                match step.range(k) {
                    Some((lb, ub)) => {
                        let when = [bucket.is_true()];
                        model.add_range_if(count.clone(), i64::from(lb), i64::from(ub), &when);
                        model.add_eq_if(LinearExpr::var(tier), k as i64, &when);
                    }
                    None => model.add_eq(LinearExpr::var(bucket), 0),
                }
            }
        }
    }

    for (i, profile) in profiles.iter().enumerate() {
        let raw = LinearExpr::var(vars.raw_chem[i]);
        match profile.fixed {
            Some(value) => model.add_eq(raw, i64::from(value)),
            None => {
                let sum = LinearExpr::sum(
                    GroupKind::ALL
                        .into_iter()
                        .filter(|&kind| profile.weight(kind) > 0)
                        .map(|kind| vars.tier(kind, ctx.index.group_of(kind, i))),
                );
                // raw = min(sum, 3)
                let within = model.new_bool(format!("within_cap{i}"));
                model.add_le_if(sum.clone(), MAX_CHEMISTRY, &[within.is_true()]);
                model.add_eq_if(raw.minus(&sum), 0, &[within.is_true()]);
                model.add_ge_if(sum, MAX_CHEMISTRY + 1, &[within.is_false()]);
                model.add_eq_if(raw, MAX_CHEMISTRY, &[within.is_false()]);
            }
        }
        model.add_product(vars.chem[i], vars.on_pitch[i], vars.raw_chem[i]);
    }
}

/// Squad total minimum and per-player floor.
pub(crate) fn compile_requirements(ctx: &RuleContext<'_>, model: &mut Model) {
    let vars = ctx.vars;
    let chemistry = &ctx.rules.chemistry;

    if chemistry.min_total > 0 {
        model.add_ge(
            LinearExpr::sum(vars.chem.iter().copied()),
            i64::from(chemistry.min_total),
        );
    }
    if chemistry.min_per_player > 0 {
        let floor = i64::from(chemistry.min_per_player);
        for (&select, &chem) in vars.select.iter().zip(&vars.chem) {
            model.add_ge_if(LinearExpr::var(chem), floor, &[select.is_true()]);
        }
    }
}
